//! Storage backend trait abstraction
//!
//! Defines the async persistence-gateway trait, implemented by each backend
//! and by `StorageBackend` via enum dispatch.

use applicant_ingest_core::{ApplicantFilter, ApplicantRecord, StoredApplicant};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StorageError;
use crate::types::{InsertOutcome, PaginatedResult, StorageStats};

/// Applicant persistence.
///
/// Implementations enforce sparse uniqueness on the Aadhaar number
/// atomically, so concurrent writers never persist two records with the
/// same non-empty key.
#[async_trait]
pub trait ApplicantStore: Send + Sync {
    /// Insert one record. A key collision is an `Ok` outcome, not an error.
    async fn insert_applicant(
        &self,
        record: &ApplicantRecord,
    ) -> Result<InsertOutcome, StorageError>;

    /// Get a record by id.
    async fn get_applicant(&self, id: &str) -> Result<Option<StoredApplicant>, StorageError>;

    /// Page through records matching `filter`, newest upload first.
    async fn list_applicants(
        &self,
        filter: &ApplicantFilter,
        offset: usize,
        limit: usize,
    ) -> Result<PaginatedResult<StoredApplicant>, StorageError>;

    /// Count all persisted records.
    async fn count_applicants(&self) -> Result<u64, StorageError>;

    /// Most recent `upload_date` in the collection.
    async fn latest_upload_date(&self) -> Result<Option<DateTime<Utc>>, StorageError>;

    /// Delete every record. Returns the number deleted.
    async fn delete_all_applicants(&self) -> Result<u64, StorageError>;

    /// Count plus latest upload date.
    async fn get_stats(&self) -> Result<StorageStats, StorageError> {
        Ok(StorageStats {
            total_records: self.count_applicants().await?,
            latest_upload_date: self.latest_upload_date().await?,
        })
    }
}
