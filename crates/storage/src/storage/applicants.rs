use applicant_ingest_core::{ApplicantFilter, ApplicantRecord, SEARCH_COLUMNS, StoredApplicant};
use rusqlite::{ToSql, params, params_from_iter};

use super::{Storage, escape_like_pattern, format_timestamp, get_conn, parse_timestamp};
use crate::error::StorageError;
use crate::types::{InsertOutcome, PaginatedResult};

const SELECT_COLUMNS: &str = "id, applicant_name, district, taluka, year, portal, scheme_name,
    application_date, status, amount_sanctioned, beneficiary_category, gender, age, mobile,
    email, aadhaar_no, upload_date";

/// Builds the WHERE clause and its positional parameters for a listing filter.
fn build_where(filter: &ApplicantFilter) -> (String, Vec<Box<dyn ToSql>>) {
    let mut clauses: Vec<String> = Vec::new();
    let mut params: Vec<Box<dyn ToSql>> = Vec::new();

    // LIKE is case-insensitive for ASCII in SQLite.
    for (column, needle) in filter.text_filters() {
        clauses.push(format!("{column} LIKE ? ESCAPE '\\'"));
        params.push(Box::new(format!("%{}%", escape_like_pattern(needle))));
    }
    if let Some(year) = filter.year {
        clauses.push("year = ?".to_owned());
        params.push(Box::new(year));
    }
    if let Some(search) = filter.search.as_deref() {
        let pattern = format!("%{}%", escape_like_pattern(search));
        let any = SEARCH_COLUMNS
            .iter()
            .map(|c| format!("{c} LIKE ? ESCAPE '\\'"))
            .collect::<Vec<_>>()
            .join(" OR ");
        clauses.push(format!("({any})"));
        for _ in SEARCH_COLUMNS {
            params.push(Box::new(pattern.clone()));
        }
    }

    if clauses.is_empty() {
        (String::new(), params)
    } else {
        (format!(" WHERE {}", clauses.join(" AND ")), params)
    }
}

impl Storage {
    /// Insert one applicant under a fresh id.
    ///
    /// A unique-index collision on the Aadhaar number yields
    /// `RejectedDuplicateKey`; any other failure is an error.
    pub fn insert_applicant(&self, record: &ApplicantRecord) -> Result<InsertOutcome, StorageError> {
        let conn = get_conn(&self.pool)?;
        let id = uuid::Uuid::new_v4().to_string();
        let result = conn.execute(
            "INSERT INTO applicants
               (id, applicant_name, district, taluka, year, portal, scheme_name, application_date,
                status, amount_sanctioned, beneficiary_category, gender, age, mobile, email,
                aadhaar_no, upload_date)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
            params![
                id,
                record.applicant_name,
                record.district,
                record.taluka,
                record.year,
                record.portal,
                record.scheme_name,
                record.application_date,
                record.status,
                record.amount_sanctioned,
                record.beneficiary_category,
                record.gender,
                record.age,
                record.mobile,
                record.email,
                record.dedup_key(),
                format_timestamp(&record.upload_date),
            ],
        );
        match result.map_err(StorageError::from) {
            Ok(_) => Ok(InsertOutcome::Saved { id }),
            Err(StorageError::Duplicate(msg)) => {
                tracing::debug!(reason = %msg, "applicant rejected by unique index");
                Ok(InsertOutcome::RejectedDuplicateKey)
            },
            Err(e) => Err(e),
        }
    }

    /// Get applicant by id.
    pub fn get_applicant(&self, id: &str) -> Result<Option<StoredApplicant>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let mut stmt =
            conn.prepare(&format!("SELECT {SELECT_COLUMNS} FROM applicants WHERE id = ?1"))?;
        let mut rows = stmt.query(params![id])?;
        match rows.next()? {
            Some(row) => Ok(Some(Self::row_to_applicant(row)?)),
            None => Ok(None),
        }
    }

    /// Page through applicants matching `filter`, newest upload first.
    pub fn list_applicants(
        &self,
        filter: &ApplicantFilter,
        offset: usize,
        limit: usize,
    ) -> Result<PaginatedResult<StoredApplicant>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let (where_sql, params) = build_where(filter);

        let total: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM applicants{where_sql}"),
            params_from_iter(params.iter()),
            |row| row.get(0),
        )?;

        let limit_i64 = limit as i64;
        let offset_i64 = offset as i64;
        let mut page_params: Vec<&dyn ToSql> = params.iter().map(|p| &**p).collect();
        page_params.push(&limit_i64);
        page_params.push(&offset_i64);

        let mut stmt = conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM applicants{where_sql}
               ORDER BY upload_date DESC, rowid DESC LIMIT ? OFFSET ?"
        ))?;
        let mut rows = stmt.query(params_from_iter(page_params))?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(Self::row_to_applicant(row)?);
        }

        Ok(PaginatedResult {
            items,
            total: total as u64,
            offset: offset as u64,
            limit: limit as u64,
        })
    }

    /// Delete every applicant. Returns the number of rows removed.
    pub fn delete_all_applicants(&self) -> Result<u64, StorageError> {
        let conn = get_conn(&self.pool)?;
        let deleted = conn.execute("DELETE FROM applicants", [])?;
        tracing::info!(deleted, "deleted all applicants");
        Ok(deleted as u64)
    }

    fn row_to_applicant(row: &rusqlite::Row<'_>) -> Result<StoredApplicant, StorageError> {
        let upload_date: String = row.get(16)?;
        Ok(StoredApplicant {
            id: row.get(0)?,
            record: ApplicantRecord {
                applicant_name: row.get(1)?,
                district: row.get(2)?,
                taluka: row.get(3)?,
                year: row.get(4)?,
                portal: row.get(5)?,
                scheme_name: row.get(6)?,
                application_date: row.get(7)?,
                status: row.get(8)?,
                amount_sanctioned: row.get(9)?,
                beneficiary_category: row.get(10)?,
                gender: row.get(11)?,
                age: row.get(12)?,
                mobile: row.get(13)?,
                email: row.get(14)?,
                aadhaar_no: row.get(15)?,
                upload_date: parse_timestamp(&upload_date)?,
            },
        })
    }
}
