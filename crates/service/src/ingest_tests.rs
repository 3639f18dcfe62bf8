//! End-to-end ingest behaviour against a real `SQLite` store, plus a
//! store that faults part way through a batch.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use applicant_ingest_core::{
    ApplicantFilter, ApplicantRecord, IngestSummary, StoredApplicant,
};
use applicant_ingest_storage::{
    ApplicantStore, InsertOutcome, PaginatedResult, Storage, StorageError,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tempfile::TempDir;

use crate::test_support::{Cell, keyed_sheet, xlsx};
use crate::{DecodeError, IngestService, RecordService, ServiceError};

#[expect(clippy::unwrap_used, reason = "test code")]
fn sqlite_services() -> (IngestService, RecordService, TempDir) {
    let dir = TempDir::new().unwrap();
    let storage: Arc<dyn ApplicantStore> =
        Arc::new(Storage::new(&dir.path().join("ingest.db")).unwrap());
    (IngestService::new(Arc::clone(&storage)), RecordService::new(storage), dir)
}

async fn names(records: &RecordService) -> Vec<String> {
    let page = records.list(ApplicantFilter::default(), None, None).await;
    let mut names: Vec<String> = page
        .map(|p| p.data.into_iter().filter_map(|a| a.record.applicant_name).collect())
        .unwrap_or_default();
    names.sort();
    names
}

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "test code")]
async fn in_batch_duplicate_keeps_last_row() {
    let (ingest, records, _dir) = sqlite_services();
    let bytes = keyed_sheet(&[("A1", "X"), ("A1", "Y"), ("", "Z")]);

    let summary = ingest.ingest(bytes).await.unwrap();

    assert_eq!(
        summary,
        IngestSummary { records_processed: 3, unique_records_saved: 2, duplicates_removed: 1 }
    );
    assert_eq!(names(&records).await, vec!["Y", "Z"]);
}

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "test code")]
async fn distinct_keys_are_all_saved() {
    let (ingest, _records, _dir) = sqlite_services();
    let bytes = keyed_sheet(&[("K1", "a"), ("K2", "b"), ("K3", "c"), ("", "d"), ("", "e")]);

    let summary = ingest.ingest(bytes).await.unwrap();

    assert_eq!(summary.records_processed, 5);
    assert_eq!(summary.unique_records_saved, 5);
    assert_eq!(summary.duplicates_removed, 0);
}

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "test code")]
async fn reingesting_the_same_file_saves_nothing_keyed() {
    let (ingest, records, _dir) = sqlite_services();
    let bytes = keyed_sheet(&[("K1", "a"), ("K2", "b")]);

    let first = ingest.ingest(bytes.clone()).await.unwrap();
    let second = ingest.ingest(bytes).await.unwrap();

    assert_eq!(first.unique_records_saved, 2);
    assert_eq!(second.unique_records_saved, 0);
    assert_eq!(second.duplicates_removed, second.records_processed);
    assert_eq!(records.stats().await.unwrap().total_records, 2);
}

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "test code")]
async fn numeric_aadhaar_cells_dedup_against_text_cells() {
    let (ingest, _records, _dir) = sqlite_services();
    let bytes = xlsx(
        &["Aadhaar No", "Applicant Name"],
        &[
            vec![Cell::Number(123_456_789_012.0), Cell::Text("numeric")],
            vec![Cell::Text(" 123456789012 "), Cell::Text("text")],
        ],
    );

    let summary = ingest.ingest(bytes).await.unwrap();
    assert_eq!(summary.unique_records_saved, 1);
}

#[tokio::test]
async fn header_only_sheet_persists_nothing() {
    let (ingest, records, _dir) = sqlite_services();

    let err = ingest.ingest(keyed_sheet(&[])).await.unwrap_err();

    assert!(matches!(err, ServiceError::Decode(DecodeError::EmptySheet)));
    assert!(err.is_client_error());
    assert!(names(&records).await.is_empty());
}

#[tokio::test]
async fn garbage_bytes_fail_to_decode() {
    let (ingest, _records, _dir) = sqlite_services();

    let err = ingest.ingest(b"definitely not a workbook".to_vec()).await.unwrap_err();

    assert!(matches!(err, ServiceError::Decode(DecodeError::Malformed(_))));
}

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "test code")]
async fn listing_reflects_saved_records_immediately() {
    let (ingest, records, _dir) = sqlite_services();
    ingest.ingest(keyed_sheet(&[("K1", "a"), ("K2", "b"), ("K3", "c")])).await.unwrap();

    let page = records.list(ApplicantFilter::default(), Some(2), Some(2)).await.unwrap();

    assert_eq!(page.total_records, 3);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.current_page, 2);
    assert_eq!(page.records_per_page, 2);
    assert_eq!(page.data.len(), 1);
}

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "test code")]
async fn page_size_is_capped() {
    let (_ingest, records, _dir) = sqlite_services();
    let page = records.list(ApplicantFilter::default(), Some(0), Some(50_000)).await.unwrap();
    assert_eq!(page.current_page, 1);
    assert_eq!(page.records_per_page, 1000);
}

/// Saves the first `fail_after` inserts, then returns a storage fault.
struct FaultyStore {
    fail_after: usize,
    inserts: AtomicUsize,
}

#[async_trait]
impl ApplicantStore for FaultyStore {
    async fn insert_applicant(
        &self,
        _record: &ApplicantRecord,
    ) -> Result<InsertOutcome, StorageError> {
        let n = self.inserts.fetch_add(1, Ordering::SeqCst);
        if n < self.fail_after {
            Ok(InsertOutcome::Saved { id: n.to_string() })
        } else {
            Err(StorageError::Timeout { operation: "insert_applicant", secs: 10 })
        }
    }

    async fn get_applicant(&self, _id: &str) -> Result<Option<StoredApplicant>, StorageError> {
        Ok(None)
    }

    async fn list_applicants(
        &self,
        _filter: &ApplicantFilter,
        offset: usize,
        limit: usize,
    ) -> Result<PaginatedResult<StoredApplicant>, StorageError> {
        Ok(PaginatedResult { items: Vec::new(), total: 0, offset: offset as u64, limit: limit as u64 })
    }

    async fn count_applicants(&self) -> Result<u64, StorageError> {
        Ok(0)
    }

    async fn latest_upload_date(&self) -> Result<Option<DateTime<Utc>>, StorageError> {
        Ok(None)
    }

    async fn delete_all_applicants(&self) -> Result<u64, StorageError> {
        Ok(0)
    }
}

#[tokio::test]
async fn storage_fault_aborts_remaining_inserts_without_rollback() {
    let store = Arc::new(FaultyStore { fail_after: 2, inserts: AtomicUsize::new(0) });
    let ingest = IngestService::new(Arc::clone(&store) as Arc<dyn ApplicantStore>);
    let bytes = keyed_sheet(&[("K1", "a"), ("K2", "b"), ("K3", "c"), ("K4", "d")]);

    let err = ingest.ingest(bytes).await.unwrap_err();

    assert!(matches!(err, ServiceError::Storage(StorageError::Timeout { .. })));
    assert!(!err.is_client_error());
    assert!(err.is_transient());
    // Two saves, one failed attempt, and nothing after it.
    assert_eq!(store.inserts.load(Ordering::SeqCst), 3);
}
