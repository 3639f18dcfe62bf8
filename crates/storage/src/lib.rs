//! Storage layer for applicant-ingest
//!
//! The persistence gateway: the only component that touches durable
//! storage. `SQLite` is the default backend; `PostgreSQL` is available
//! behind the `postgres` feature. Both enforce sparse uniqueness on the
//! Aadhaar number at the storage layer.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]

mod backend;
pub mod error;
#[cfg(feature = "sqlite")]
mod migrations;
#[cfg(feature = "postgres")]
mod pg_migrations;
#[cfg(feature = "postgres")]
mod pg_storage;
#[cfg(feature = "sqlite")]
mod sqlite_async;
#[cfg(feature = "sqlite")]
mod storage;
#[cfg(all(test, feature = "sqlite"))]
mod tests;
pub mod traits;
mod types;

pub use backend::StorageBackend;
pub use error::StorageError;
#[cfg(feature = "postgres")]
pub use pg_storage::PgStorage;
#[cfg(feature = "sqlite")]
pub use storage::Storage;
pub use traits::ApplicantStore;
pub use types::{InsertOutcome, PaginatedResult, StorageStats};

/// Bound applied to every storage call, from
/// `APPLICANT_INGEST_STORAGE_TIMEOUT_SECS` (default 10 s).
pub(crate) fn storage_timeout() -> std::time::Duration {
    std::time::Duration::from_secs(applicant_ingest_core::env_parse_with_default(
        "APPLICANT_INGEST_STORAGE_TIMEOUT_SECS",
        applicant_ingest_core::STORAGE_TIMEOUT_SECS,
    ))
}
