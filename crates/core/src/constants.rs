//! Shared constants for applicant-ingest.
//!
//! Centralizes limits and defaults used by more than one crate.

/// Maximum page size for any listing query (DoS protection).
pub const MAX_QUERY_LIMIT: usize = 1000;

/// Default page size when the caller does not specify one.
pub const DEFAULT_QUERY_LIMIT: usize = 100;

/// Upper bound on an uploaded spreadsheet, in bytes (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Bound on a single storage call, in seconds.
pub const STORAGE_TIMEOUT_SECS: u64 = 10;

/// `SQLite` connection pool: default size.
pub const SQLITE_POOL_SIZE: u32 = 8;

/// `PostgreSQL` connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 20;

/// `PostgreSQL` connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// `PostgreSQL` connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;

/// Startup connection attempts before giving up.
pub const STORAGE_CONNECT_MAX_RETRIES: u32 = 5;

/// Cap on the exponential backoff between startup connection attempts.
pub const STORAGE_CONNECT_MAX_BACKOFF_MS: u64 = 10_000;
