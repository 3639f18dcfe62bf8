use std::sync::Arc;

use applicant_ingest_core::{IngestSummary, map_rows, reconcile};
use applicant_ingest_storage::{ApplicantStore, InsertOutcome};
use chrono::Utc;

use crate::{ServiceError, spreadsheet};

/// Drives one upload through decode, map, reconcile and persist.
pub struct IngestService {
    storage: Arc<dyn ApplicantStore>,
}

impl IngestService {
    #[must_use]
    pub fn new(storage: Arc<dyn ApplicantStore>) -> Self {
        Self { storage }
    }

    /// Ingests one spreadsheet and reports outcome counts.
    ///
    /// Decode failures abort before anything is written. Key collisions
    /// with already-persisted records are counted, never raised. Any other
    /// storage fault stops the batch; records saved before it stay saved.
    pub async fn ingest(&self, bytes: Vec<u8>) -> Result<IngestSummary, ServiceError> {
        let rows = tokio::task::spawn_blocking(move || spreadsheet::decode(&bytes)).await??;
        let records_processed = rows.len() as u64;

        let batch = reconcile(map_rows(&rows, Utc::now()));
        if batch.is_empty() {
            return Err(ServiceError::NoValidData);
        }

        let mut saved: u64 = 0;
        let mut rejected: u64 = 0;
        for record in &batch {
            match self.storage.insert_applicant(record).await {
                Ok(InsertOutcome::Saved { .. }) => saved += 1,
                Ok(InsertOutcome::RejectedDuplicateKey) => {
                    rejected += 1;
                    tracing::debug!(
                        aadhaar_no = %record.masked_key().unwrap_or_default(),
                        "skipping applicant already on file"
                    );
                },
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        saved,
                        remaining = batch.len() as u64 - saved - rejected,
                        "ingest aborted by storage fault"
                    );
                    return Err(e.into());
                },
            }
        }

        let summary = IngestSummary::new(records_processed, saved);
        tracing::info!(
            records_processed = summary.records_processed,
            unique_records_saved = summary.unique_records_saved,
            duplicates_removed = summary.duplicates_removed,
            rejected_by_storage = rejected,
            "ingest complete"
        );
        Ok(summary)
    }
}
