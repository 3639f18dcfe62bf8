//! Typed error enum for the storage layer.
//!
//! Callers match on specific failure modes (not found, duplicate key,
//! timeout, backend fault) instead of downcasting opaque boxes.

use thiserror::Error;

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Row not found for expected-present entity.
    #[error("not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// Unique constraint violation on the Aadhaar number.
    #[error("duplicate: {0}")]
    Duplicate(String),

    /// `SQLite` statement or connection failure.
    #[cfg(feature = "sqlite")]
    #[error("database error: {0}")]
    Sqlite(#[source] rusqlite::Error),

    /// `SQLite` pool could not hand out a connection.
    #[cfg(feature = "sqlite")]
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// `PostgreSQL` query / connection failure.
    #[cfg(feature = "postgres")]
    #[error("database error: {0}")]
    Postgres(#[source] sqlx::Error),

    /// A storage call exceeded its time bound.
    #[error("storage operation '{operation}' timed out after {secs}s")]
    Timeout { operation: &'static str, secs: u64 },

    /// The blocking task running a storage call panicked or was cancelled.
    #[error("storage task failed: {0}")]
    Join(String),

    /// Row data could not be converted into a domain type.
    #[error("data corruption: {context}")]
    DataCorruption {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Migration failure.
    #[error("migration error: {0}")]
    Migration(String),
}

impl StorageError {
    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            #[cfg(feature = "sqlite")]
            Self::Pool(_) => true,
            #[cfg(feature = "sqlite")]
            Self::Sqlite(rusqlite::Error::SqliteFailure(e, _)) => matches!(
                e.code,
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
            ),
            #[cfg(feature = "postgres")]
            Self::Postgres(sqlx::Error::PoolTimedOut | sqlx::Error::Io(_)) => true,
            _ => false,
        }
    }

    /// Whether this error is a unique-constraint violation.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }
}

/// Custom `From<rusqlite::Error>`, not blanket `#[from]`.
///
/// - `QueryReturnedNoRows` → `NotFound` (callers remap with entity context)
/// - `SQLITE_CONSTRAINT_UNIQUE` → `Duplicate`
/// - Everything else → `Sqlite`
#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::QueryReturnedNoRows => {
                Self::NotFound { entity: "row", id: "unknown".into() }
            },
            rusqlite::Error::SqliteFailure(e, msg)
                if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                Self::Duplicate(msg.clone().unwrap_or_else(|| "unique constraint".to_owned()))
            },
            _ => Self::Sqlite(err),
        }
    }
}

/// Custom `From<sqlx::Error>`, not blanket `#[from]`.
///
/// - `RowNotFound` → `NotFound`
/// - SQLSTATE 23505 → `Duplicate`
/// - Everything else → `Postgres`
#[cfg(feature = "postgres")]
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound { entity: "row", id: "unknown".into() },
            sqlx::Error::Database(db_err) if db_err.code().is_some_and(|c| c == "23505") => {
                Self::Duplicate(db_err.message().to_owned())
            },
            _ => Self::Postgres(err),
        }
    }
}

impl From<chrono::ParseError> for StorageError {
    fn from(err: chrono::ParseError) -> Self {
        Self::DataCorruption { context: "upload_date timestamp".to_owned(), source: Box::new(err) }
    }
}
