//! Authors repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{author::CreateAuthor, Author, AuthorReportEntry},
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get author by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Author> {
        sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))
    }

    /// Check whether an author exists
    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM authors WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// List all authors ordered by name
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>("SELECT * FROM authors ORDER BY name, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(authors)
    }

    /// Create a new author
    pub async fn insert(&self, author: &CreateAuthor) -> AppResult<Author> {
        let created = sqlx::query_as::<_, Author>(
            "INSERT INTO authors (name) VALUES ($1) RETURNING *",
        )
        .bind(&author.name)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    /// Per-author aggregates over all books, in one grouped query.
    /// Authors without books appear with zero counts and null aggregates.
    pub async fn report_entries(&self) -> AppResult<Vec<AuthorReportEntry>> {
        let entries = sqlx::query_as::<_, AuthorReportEntry>(
            r#"
            SELECT a.id as author_id,
                   a.name as author_name,
                   COUNT(b.id) as total_books,
                   COUNT(b.id) FILTER (WHERE b.status = 'available') as available_books,
                   COUNT(b.id) FILTER (WHERE b.status = 'reserved') as reserved_books,
                   AVG(b.rating)::float8 as average_rating,
                   MAX(b.publication_date) as latest_publication_date
            FROM authors a
            LEFT JOIN books b ON b.author_id = a.id
            GROUP BY a.id, a.name
            ORDER BY a.name, a.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }
}
