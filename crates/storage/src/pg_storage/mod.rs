//! PostgreSQL storage backend using sqlx.

mod applicants;

use std::future::Future;
use std::time::Duration;

use applicant_ingest_core::{
    ApplicantRecord, PG_POOL_ACQUIRE_TIMEOUT_SECS, PG_POOL_IDLE_TIMEOUT_SECS,
    PG_POOL_MAX_CONNECTIONS, StoredApplicant,
};
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

use crate::error::StorageError;

use super::pg_migrations::run_pg_migrations;

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
    timeout: Duration,
}

impl PgStorage {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(PG_POOL_MAX_CONNECTIONS)
            .acquire_timeout(Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        run_pg_migrations(&pool).await.map_err(|e| StorageError::Migration(e.to_string()))?;
        tracing::info!("PgStorage initialized");
        Ok(Self { pool, timeout: crate::storage_timeout() })
    }

    /// Runs a storage future under the configured time bound.
    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> Result<T, StorageError>
    where
        F: Future<Output = Result<T, StorageError>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_elapsed) => {
                tracing::warn!(operation, secs = self.timeout.as_secs(), "storage call timed out");
                Err(StorageError::Timeout { operation, secs: self.timeout.as_secs() })
            },
        }
    }
}

/// Convert `usize` to `i64` for SQL LIMIT/OFFSET binds.
/// Saturates to `i64::MAX` on overflow (only possible on 128-bit targets).
pub(crate) fn usize_to_i64(val: usize) -> i64 {
    i64::try_from(val).unwrap_or(i64::MAX)
}

pub(crate) fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

pub(crate) fn row_to_applicant(row: &sqlx::postgres::PgRow) -> Result<StoredApplicant, StorageError> {
    let upload_date: DateTime<Utc> = row.try_get("upload_date")?;
    Ok(StoredApplicant {
        id: row.try_get("id")?,
        record: ApplicantRecord {
            applicant_name: row.try_get("applicant_name")?,
            district: row.try_get("district")?,
            taluka: row.try_get("taluka")?,
            year: row.try_get("year")?,
            portal: row.try_get("portal")?,
            scheme_name: row.try_get("scheme_name")?,
            application_date: row.try_get("application_date")?,
            status: row.try_get("status")?,
            amount_sanctioned: row.try_get("amount_sanctioned")?,
            beneficiary_category: row.try_get("beneficiary_category")?,
            gender: row.try_get("gender")?,
            age: row.try_get("age")?,
            mobile: row.try_get("mobile")?,
            email: row.try_get("email")?,
            aadhaar_no: row.try_get("aadhaar_no")?,
            upload_date,
        },
    })
}
