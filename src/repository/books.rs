//! Books repository for database operations

use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        author::AuthorSummary,
        book::{Book, CreateBook},
        BookWithAuthor,
    },
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Create a new book. Status always starts as `available`.
    pub async fn insert(&self, book: &CreateBook) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author_id, publication_date, rating, status)
            VALUES ($1, $2, $3, $4, 'available')
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(book.author_id)
        .bind(book.publication_date)
        .bind(book.rating.unwrap_or(0))
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    /// List all books with their author, ordered by rating (desc) then
    /// publication date (most recent first), id as stable tie-break.
    /// Single JOIN query; author data never triggers per-row follow-ups.
    pub async fn list_with_authors(&self) -> AppResult<Vec<BookWithAuthor>> {
        let rows = sqlx::query(
            r#"
            SELECT b.id, b.title, b.publication_date, b.rating, b.status,
                   b.reserved_by_email,
                   a.id as author_id, a.name as author_name
            FROM books b
            JOIN authors a ON a.id = b.author_id
            ORDER BY b.rating DESC, b.publication_date DESC, b.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let books = rows
            .into_iter()
            .map(|row| BookWithAuthor {
                id: row.get("id"),
                title: row.get("title"),
                publication_date: row.get("publication_date"),
                rating: row.get("rating"),
                status: row.get("status"),
                reserved_by_email: row.get("reserved_by_email"),
                author: AuthorSummary {
                    id: row.get("author_id"),
                    name: row.get("author_name"),
                },
            })
            .collect();

        Ok(books)
    }

    /// Reserve a book, but only if it is still available.
    /// The conditional single-row update is the concurrency guard: of two
    /// concurrent attempts on the same row, at most one matches.
    /// Returns `None` when no available row matched (missing or reserved).
    pub async fn reserve(&self, id: i32, email: &str) -> AppResult<Option<Book>> {
        let updated = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET status = 'reserved', reserved_by_email = $2, updated_at = NOW()
            WHERE id = $1 AND status = 'available'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }
}
