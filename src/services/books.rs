//! Book catalog service: creation, listing and reservations

use chrono::{NaiveDate, Utc};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, CreateBook, ReserveBook},
        BookWithAuthor,
    },
    repository::Repository,
};

/// A book cannot be published in the future
fn validate_publication_date(date: NaiveDate) -> AppResult<()> {
    if date > Utc::now().date_naive() {
        return Err(AppError::invalid(
            "publication_date",
            "must be in the past or today",
        ));
    }
    Ok(())
}

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get a book by ID
    pub async fn get(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// List all books with authors, sorted by rating then publication date
    pub async fn list(&self) -> AppResult<Vec<BookWithAuthor>> {
        self.repository.books.list_with_authors().await
    }

    /// Create a new book. The record always starts as `available`.
    pub async fn create(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()?;
        validate_publication_date(book.publication_date)?;

        if !self.repository.authors.exists(book.author_id).await? {
            return Err(AppError::invalid("author", "must exist"));
        }

        self.repository.books.insert(&book).await
    }

    /// Reserve an available book for an email address.
    /// A reserved book stays reserved: the conflict leaves status and the
    /// original reserver's email untouched.
    pub async fn reserve(&self, id: i32, request: ReserveBook) -> AppResult<Book> {
        request.user.validate()?;

        match self.repository.books.reserve(id, &request.user.email).await? {
            Some(book) => Ok(book),
            None => {
                // Distinguish a missing book from a lost reservation race
                self.repository.books.get_by_id(id).await?;
                Err(AppError::Conflict("reservation already exists".to_string()))
            }
        }
    }
}
