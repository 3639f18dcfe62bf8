//! Typed error enum for the service layer.
//!
//! Lets callers tell user-facing input problems (bad spreadsheet, empty
//! sheet) apart from persistence faults without downcasting.

use applicant_ingest_storage::StorageError;
use thiserror::Error;

use crate::spreadsheet::DecodeError;

/// Service-layer error unifying decode and storage failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The upload could not be decoded, or its first sheet has no data rows.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Reconciliation left nothing to persist.
    #[error("No valid data found in Excel file")]
    NoValidData,

    /// Caller provided invalid input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Storage operation failed for a reason other than a key collision.
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// A blocking task panicked or was cancelled.
    #[error("task join: {0}")]
    Join(String),
}

impl ServiceError {
    /// Whether the failure was caused by the caller's input.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::NoValidData | Self::InvalidInput(_))
    }

    /// Whether this error is likely transient (worth retrying).
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_transient())
    }

    /// Whether this error represents a not-found condition.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Storage(StorageError::NotFound { .. }))
    }
}

impl From<tokio::task::JoinError> for ServiceError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Join(err.to_string())
    }
}
