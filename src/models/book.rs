//! Book model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::author::AuthorSummary;

/// Book lifecycle status. The only exposed transition is
/// `available` → `reserved`; there is no reverse transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "book_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    Available,
    Reserved,
}

impl Default for BookStatus {
    fn default() -> Self {
        BookStatus::Available
    }
}

/// Full book model (DB + API).
/// Invariant: `reserved_by_email` is non-null iff `status` is `reserved`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author_id: i32,
    pub publication_date: NaiveDate,
    pub rating: i32,
    pub status: BookStatus,
    pub reserved_by_email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Book with its author embedded, as returned by the listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookWithAuthor {
    pub id: i32,
    pub title: String,
    pub publication_date: NaiveDate,
    pub rating: i32,
    pub status: BookStatus,
    pub reserved_by_email: Option<String>,
    pub author: AuthorSummary,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "can't be blank"))]
    pub title: String,
    pub author_id: i32,
    pub publication_date: NaiveDate,
    #[serde(default)]
    pub rating: Option<i32>,
}

/// Reserve book request, wrapping the reserving user
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReserveBook {
    pub user: ReservingUser,
}

/// Reserving user payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReservingUser {
    #[validate(length(min = 1, message = "can't be blank"), email(message = "is invalid"))]
    pub email: String,
}
