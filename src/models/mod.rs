//! Data models for Lectern

pub mod author;
pub mod book;
pub mod report;

// Re-export commonly used types
pub use author::{Author, AuthorSummary};
pub use book::{Book, BookStatus, BookWithAuthor};
pub use report::{AuthorReportEntry, ReportResponse};
