//! Result types returned by the persistence gateway.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of a single insert attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The record was persisted under a fresh id.
    Saved { id: String },
    /// Another persisted record already holds the same Aadhaar number.
    RejectedDuplicateKey,
}

impl InsertOutcome {
    #[must_use]
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

/// Paginated query result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResult<T> {
    /// Items in the current page.
    pub items: Vec<T>,
    /// Total number of matching items across all pages.
    pub total: u64,
    /// Offset from the start.
    pub offset: u64,
    /// Maximum items per page.
    pub limit: u64,
}

/// Collection-level statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageStats {
    pub total_records: u64,
    pub latest_upload_date: Option<DateTime<Utc>>,
}
