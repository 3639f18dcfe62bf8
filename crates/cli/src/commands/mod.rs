pub(crate) mod import;
pub(crate) mod records;
pub(crate) mod serve;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use applicant_ingest_core::{STORAGE_CONNECT_MAX_BACKOFF_MS, STORAGE_CONNECT_MAX_RETRIES};
use applicant_ingest_storage::{ApplicantStore, StorageBackend, StorageError};

use crate::{default_db_path, ensure_db_dir};

/// Where records live: a PostgreSQL URL when given, else a SQLite file.
pub(crate) struct StorageTarget {
    db_path: PathBuf,
    database_url: Option<String>,
}

impl StorageTarget {
    pub(crate) fn new(db_path: Option<PathBuf>, database_url: Option<String>) -> Self {
        Self {
            db_path: db_path.unwrap_or_else(default_db_path),
            database_url: database_url.filter(|url| !url.trim().is_empty()),
        }
    }

    async fn connect_once(&self) -> Result<StorageBackend, StorageError> {
        #[cfg(feature = "postgres")]
        {
            if let Some(url) = self.database_url.as_deref() {
                return StorageBackend::new_postgres(url).await;
            }
        }
        StorageBackend::new_sqlite(&self.db_path)
    }

    /// Opens the backend, retrying with exponential backoff.
    pub(crate) async fn connect(&self) -> Result<Arc<dyn ApplicantStore>> {
        #[cfg(not(feature = "postgres"))]
        {
            if self.database_url.is_some() {
                anyhow::bail!("DATABASE_URL is set but this binary was built without the `postgres` feature");
            }
        }
        if self.database_url.is_none() {
            ensure_db_dir(&self.db_path)?;
        }
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match self.connect_once().await {
                Ok(backend) => {
                    tracing::info!(backend = backend.kind(), "storage connected");
                    return Ok(Arc::new(backend));
                },
                Err(e) if attempt >= STORAGE_CONNECT_MAX_RETRIES => {
                    tracing::error!(error = %e, attempt, "could not connect to storage, giving up");
                    return Err(e.into());
                },
                Err(e) => {
                    let delay = backoff(attempt);
                    tracing::warn!(
                        error = %e,
                        attempt,
                        retry_in_ms = delay.as_millis() as u64,
                        "storage connection failed"
                    );
                    tokio::time::sleep(delay).await;
                },
            }
        }
    }
}

/// `1s * 2^attempt`, capped.
fn backoff(attempt: u32) -> Duration {
    let millis = 1000_u64.saturating_mul(2_u64.saturating_pow(attempt));
    Duration::from_millis(millis.min(STORAGE_CONNECT_MAX_BACKOFF_MS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_then_caps() {
        assert_eq!(backoff(1), Duration::from_secs(2));
        assert_eq!(backoff(2), Duration::from_secs(4));
        assert_eq!(backoff(3), Duration::from_secs(8));
        assert_eq!(backoff(4), Duration::from_secs(10));
        assert_eq!(backoff(40), Duration::from_secs(10));
    }
}
