//! Unified storage backend with enum dispatch.

#[cfg(feature = "sqlite")]
use std::path::Path;

use applicant_ingest_core::{ApplicantFilter, ApplicantRecord, StoredApplicant};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StorageError;
use crate::traits::ApplicantStore;
use crate::types::{InsertOutcome, PaginatedResult};

macro_rules! dispatch {
    ($self:expr, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            #[cfg(feature = "sqlite")]
            StorageBackend::Sqlite(s) => <crate::Storage as ApplicantStore>::$method(s, $($arg),*).await,
            #[cfg(feature = "postgres")]
            StorageBackend::Postgres(s) => <crate::PgStorage as ApplicantStore>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Clone, Debug)]
pub enum StorageBackend {
    #[cfg(feature = "sqlite")]
    Sqlite(crate::Storage),
    #[cfg(feature = "postgres")]
    Postgres(crate::PgStorage),
}

impl StorageBackend {
    #[cfg(feature = "sqlite")]
    pub fn new_sqlite(db_path: &Path) -> Result<Self, StorageError> {
        Ok(Self::Sqlite(crate::Storage::new(db_path)?))
    }

    #[cfg(feature = "postgres")]
    pub async fn new_postgres(database_url: &str) -> Result<Self, StorageError> {
        Ok(Self::Postgres(crate::PgStorage::new(database_url).await?))
    }

    /// Short backend name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => "sqlite",
            #[cfg(feature = "postgres")]
            Self::Postgres(_) => "postgres",
        }
    }
}

#[async_trait]
impl ApplicantStore for StorageBackend {
    async fn insert_applicant(
        &self,
        record: &ApplicantRecord,
    ) -> Result<InsertOutcome, StorageError> {
        dispatch!(self, insert_applicant(record))
    }

    async fn get_applicant(&self, id: &str) -> Result<Option<StoredApplicant>, StorageError> {
        dispatch!(self, get_applicant(id))
    }

    async fn list_applicants(
        &self,
        filter: &ApplicantFilter,
        offset: usize,
        limit: usize,
    ) -> Result<PaginatedResult<StoredApplicant>, StorageError> {
        dispatch!(self, list_applicants(filter, offset, limit))
    }

    async fn count_applicants(&self) -> Result<u64, StorageError> {
        dispatch!(self, count_applicants())
    }

    async fn latest_upload_date(&self) -> Result<Option<DateTime<Utc>>, StorageError> {
        dispatch!(self, latest_upload_date())
    }

    async fn delete_all_applicants(&self) -> Result<u64, StorageError> {
        dispatch!(self, delete_all_applicants())
    }
}
