use std::sync::Arc;

use applicant_ingest_core::{
    ApplicantFilter, DEFAULT_QUERY_LIMIT, MAX_QUERY_LIMIT, StoredApplicant,
};
use applicant_ingest_storage::{ApplicantStore, StorageStats};

use crate::ServiceError;

/// One page of the listing, with 1-based page arithmetic already done.
#[derive(Debug, Clone)]
pub struct RecordPage {
    pub total_records: u64,
    pub current_page: u64,
    pub total_pages: u64,
    pub records_per_page: u64,
    pub filter: ApplicantFilter,
    pub data: Vec<StoredApplicant>,
}

/// Read side and administrative reset over persisted applicants.
pub struct RecordService {
    storage: Arc<dyn ApplicantStore>,
}

impl RecordService {
    #[must_use]
    pub fn new(storage: Arc<dyn ApplicantStore>) -> Self {
        Self { storage }
    }

    /// Lists one page. `page` is 1-based; zero or missing values fall back
    /// to page 1 and the default page size, and the size is capped.
    pub async fn list(
        &self,
        filter: ApplicantFilter,
        page: Option<u64>,
        limit: Option<u64>,
    ) -> Result<RecordPage, ServiceError> {
        let filter = filter.normalized();
        let page = page.filter(|p| *p > 0).unwrap_or(1);
        let limit = limit
            .filter(|l| *l > 0)
            .map_or(DEFAULT_QUERY_LIMIT, |l| usize::try_from(l).unwrap_or(MAX_QUERY_LIMIT))
            .min(MAX_QUERY_LIMIT);
        let offset = usize::try_from(page - 1)
            .ok()
            .and_then(|p| p.checked_mul(limit))
            .ok_or_else(|| ServiceError::InvalidInput(format!("page {page} is out of range")))?;

        let result = self.storage.list_applicants(&filter, offset, limit).await?;
        Ok(RecordPage {
            total_records: result.total,
            current_page: page,
            total_pages: result.total.div_ceil(result.limit.max(1)),
            records_per_page: result.limit,
            filter,
            data: result.items,
        })
    }

    pub async fn get(&self, id: &str) -> Result<Option<StoredApplicant>, ServiceError> {
        Ok(self.storage.get_applicant(id).await?)
    }

    pub async fn delete_all(&self) -> Result<u64, ServiceError> {
        let deleted = self.storage.delete_all_applicants().await?;
        tracing::warn!(deleted, "all applicant records deleted");
        Ok(deleted)
    }

    pub async fn stats(&self) -> Result<StorageStats, ServiceError> {
        Ok(self.storage.get_stats().await?)
    }
}
