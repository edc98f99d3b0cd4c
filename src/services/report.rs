//! Catalog report service

use chrono::Utc;

use crate::{error::AppResult, models::ReportResponse, repository::Repository};

#[derive(Clone)]
pub struct ReportService {
    repository: Repository,
}

impl ReportService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Generate the per-author catalog report.
    /// One grouped query regardless of the number of authors or books.
    pub async fn generate(&self) -> AppResult<ReportResponse> {
        let report = self.repository.authors.report_entries().await?;
        Ok(ReportResponse {
            generated_at: Utc::now(),
            report,
        })
    }
}
