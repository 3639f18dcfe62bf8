use chrono::{DateTime, Utc};

use super::{Storage, get_conn, parse_timestamp};
use crate::error::StorageError;

impl Storage {
    /// Count all applicants.
    pub fn count_applicants(&self) -> Result<u64, StorageError> {
        let conn = get_conn(&self.pool)?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM applicants", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Most recent upload date, if any record exists.
    pub fn latest_upload_date(&self) -> Result<Option<DateTime<Utc>>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let latest: Option<String> =
            conn.query_row("SELECT MAX(upload_date) FROM applicants", [], |row| row.get(0))?;
        latest.as_deref().map(parse_timestamp).transpose()
    }
}
