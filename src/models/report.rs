//! Catalog report models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// One report entry per author, aggregated over that author's books
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AuthorReportEntry {
    pub author_id: i32,
    pub author_name: String,
    pub total_books: i64,
    pub available_books: i64,
    pub reserved_books: i64,
    /// Mean rating over the author's books; null when the author has none
    pub average_rating: Option<f64>,
    pub latest_publication_date: Option<NaiveDate>,
}

/// Report envelope: generation timestamp plus per-author entries
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportResponse {
    pub generated_at: DateTime<Utc>,
    pub report: Vec<AuthorReportEntry>,
}
