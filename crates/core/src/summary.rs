//! Outcome counters for one ingest call.

use serde::{Deserialize, Serialize};

/// Result of ingesting one uploaded spreadsheet.
///
/// `duplicates_removed` is always `records_processed - unique_records_saved`.
/// It counts rows folded away by batch reconciliation together with rows
/// rejected by the storage-level unique index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestSummary {
    pub records_processed: u64,
    pub unique_records_saved: u64,
    pub duplicates_removed: u64,
}

impl IngestSummary {
    #[must_use]
    pub fn new(records_processed: u64, unique_records_saved: u64) -> Self {
        Self {
            records_processed,
            unique_records_saved,
            duplicates_removed: records_processed.saturating_sub(unique_records_saved),
        }
    }
}
