//! Async trait implementation for `SQLite` `Storage` via `spawn_blocking`.

use applicant_ingest_core::{ApplicantFilter, ApplicantRecord, StoredApplicant};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::Storage;
use crate::error::StorageError;
use crate::traits::ApplicantStore;
use crate::types::{InsertOutcome, PaginatedResult};

/// Helper: run a blocking closure on the tokio blocking pool, bounded by `timeout`.
///
/// On expiry the caller gets `Timeout`; the blocking task itself runs to
/// completion in the background.
async fn blocking<F, T>(operation: &'static str, timeout: Duration, f: F) -> Result<T, StorageError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::time::timeout(timeout, tokio::task::spawn_blocking(f)).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_err)) => Err(StorageError::Join(join_err.to_string())),
        Err(_elapsed) => {
            tracing::warn!(operation, secs = timeout.as_secs(), "storage call timed out");
            Err(StorageError::Timeout { operation, secs: timeout.as_secs() })
        },
    }
}

/// Body-generating macro for async-to-blocking delegation.
///
/// Each argument is annotated with a capture kind:
/// - `@ref arg`: `.clone()` a `&T`, pass as `&arg`
/// - `@str arg`: `.to_owned()` a `&str`, pass as `&arg`
/// - `@val arg`: move directly (Copy/owned types)
macro_rules! delegate {
    ($self:ident, $method:ident $(, @$kind:ident $arg:ident)*) => {{
        let s = $self.clone();
        let timeout = $self.timeout;
        $(delegate!(@capture $kind $arg);)*
        blocking(stringify!($method), timeout, move || s.$method($(delegate!(@pass $kind $arg)),*)).await
    }};
    (@capture ref $arg:ident) => { let $arg = $arg.clone(); };
    (@capture str $arg:ident) => { let $arg = $arg.to_owned(); };
    (@capture val $arg:ident) => { };
    (@pass ref $arg:ident) => { &$arg };
    (@pass str $arg:ident) => { &$arg };
    (@pass val $arg:ident) => { $arg };
}

#[async_trait]
impl ApplicantStore for Storage {
    async fn insert_applicant(
        &self,
        record: &ApplicantRecord,
    ) -> Result<InsertOutcome, StorageError> {
        delegate!(self, insert_applicant, @ref record)
    }

    async fn get_applicant(&self, id: &str) -> Result<Option<StoredApplicant>, StorageError> {
        delegate!(self, get_applicant, @str id)
    }

    async fn list_applicants(
        &self,
        filter: &ApplicantFilter,
        offset: usize,
        limit: usize,
    ) -> Result<PaginatedResult<StoredApplicant>, StorageError> {
        delegate!(self, list_applicants, @ref filter, @val offset, @val limit)
    }

    async fn count_applicants(&self) -> Result<u64, StorageError> {
        delegate!(self, count_applicants)
    }

    async fn latest_upload_date(&self) -> Result<Option<DateTime<Utc>>, StorageError> {
        delegate!(self, latest_upload_date)
    }

    async fn delete_all_applicants(&self) -> Result<u64, StorageError> {
        delegate!(self, delete_all_applicants)
    }
}
