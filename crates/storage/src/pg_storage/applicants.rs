//! ApplicantStore implementation for PgStorage.

use applicant_ingest_core::{ApplicantFilter, ApplicantRecord, SEARCH_COLUMNS, StoredApplicant};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Postgres, QueryBuilder};

use super::{PgStorage, escape_like, row_to_applicant, usize_to_i64};
use crate::error::StorageError;
use crate::traits::ApplicantStore;
use crate::types::{InsertOutcome, PaginatedResult};

const SELECT_COLUMNS: &str = "SELECT id, applicant_name, district, taluka, year, portal, scheme_name,
    application_date, status, amount_sanctioned, beneficiary_category, gender, age, mobile,
    email, aadhaar_no, upload_date FROM applicants";

/// Appends `WHERE ...` for `filter` to `qb`. ILIKE matches case-insensitively.
fn push_where(qb: &mut QueryBuilder<'_, Postgres>, filter: &ApplicantFilter) {
    let mut first = true;
    let mut next_clause = |qb: &mut QueryBuilder<'_, Postgres>| {
        qb.push(if first { " WHERE " } else { " AND " });
        first = false;
    };

    for (column, needle) in filter.text_filters() {
        next_clause(qb);
        qb.push(column).push(" ILIKE ").push_bind(format!("%{}%", escape_like(needle)));
    }
    if let Some(year) = filter.year {
        next_clause(qb);
        qb.push("year = ").push_bind(year);
    }
    if let Some(search) = filter.search.as_deref() {
        next_clause(qb);
        let pattern = format!("%{}%", escape_like(search));
        qb.push("(");
        for (i, column) in SEARCH_COLUMNS.iter().enumerate() {
            if i > 0 {
                qb.push(" OR ");
            }
            qb.push(*column).push(" ILIKE ").push_bind(pattern.clone());
        }
        qb.push(")");
    }
}

#[async_trait]
impl ApplicantStore for PgStorage {
    async fn insert_applicant(
        &self,
        record: &ApplicantRecord,
    ) -> Result<InsertOutcome, StorageError> {
        let id = uuid::Uuid::new_v4().to_string();
        let insert = async {
            sqlx::query(
                "INSERT INTO applicants
                   (id, applicant_name, district, taluka, year, portal, scheme_name,
                    application_date, status, amount_sanctioned, beneficiary_category, gender,
                    age, mobile, email, aadhaar_no, upload_date)
                   VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)",
            )
            .bind(&id)
            .bind(&record.applicant_name)
            .bind(&record.district)
            .bind(&record.taluka)
            .bind(record.year)
            .bind(&record.portal)
            .bind(&record.scheme_name)
            .bind(&record.application_date)
            .bind(&record.status)
            .bind(record.amount_sanctioned)
            .bind(&record.beneficiary_category)
            .bind(&record.gender)
            .bind(record.age)
            .bind(&record.mobile)
            .bind(&record.email)
            .bind(record.dedup_key())
            .bind(record.upload_date)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)
        };
        match self.bounded("insert_applicant", insert).await {
            Ok(_) => Ok(InsertOutcome::Saved { id }),
            Err(StorageError::Duplicate(msg)) => {
                tracing::debug!(reason = %msg, "applicant rejected by unique index");
                Ok(InsertOutcome::RejectedDuplicateKey)
            },
            Err(e) => Err(e),
        }
    }

    async fn get_applicant(&self, id: &str) -> Result<Option<StoredApplicant>, StorageError> {
        let query = format!("{SELECT_COLUMNS} WHERE id = $1");
        let fetch = async {
            let row = sqlx::query(&query).bind(id).fetch_optional(&self.pool).await?;
            Ok::<_, StorageError>(row.as_ref().map(row_to_applicant).transpose()?)
        };
        self.bounded("get_applicant", fetch).await
    }

    async fn list_applicants(
        &self,
        filter: &ApplicantFilter,
        offset: usize,
        limit: usize,
    ) -> Result<PaginatedResult<StoredApplicant>, StorageError> {
        let fetch = async {
            let mut count_qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM applicants");
            push_where(&mut count_qb, filter);
            let total: i64 = count_qb.build_query_scalar().fetch_one(&self.pool).await?;

            let mut qb = QueryBuilder::<Postgres>::new(SELECT_COLUMNS);
            push_where(&mut qb, filter);
            qb.push(" ORDER BY upload_date DESC, seq DESC LIMIT ")
                .push_bind(usize_to_i64(limit))
                .push(" OFFSET ")
                .push_bind(usize_to_i64(offset));
            let rows = qb.build().fetch_all(&self.pool).await?;
            let items = rows.iter().map(row_to_applicant).collect::<Result<Vec<_>, _>>()?;

            Ok::<_, StorageError>(PaginatedResult {
                items,
                total: u64::try_from(total).unwrap_or(0),
                offset: u64::try_from(offset).unwrap_or(0),
                limit: u64::try_from(limit).unwrap_or(0),
            })
        };
        self.bounded("list_applicants", fetch).await
    }

    async fn count_applicants(&self) -> Result<u64, StorageError> {
        let fetch = async {
            let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM applicants")
                .fetch_one(&self.pool)
                .await?;
            Ok::<_, StorageError>(u64::try_from(count).unwrap_or(0))
        };
        self.bounded("count_applicants", fetch).await
    }

    async fn latest_upload_date(&self) -> Result<Option<DateTime<Utc>>, StorageError> {
        let fetch = async {
            let latest: Option<DateTime<Utc>> =
                sqlx::query_scalar("SELECT MAX(upload_date) FROM applicants")
                    .fetch_one(&self.pool)
                    .await?;
            Ok::<_, StorageError>(latest)
        };
        self.bounded("latest_upload_date", fetch).await
    }

    async fn delete_all_applicants(&self) -> Result<u64, StorageError> {
        let delete = async {
            let result = sqlx::query("DELETE FROM applicants").execute(&self.pool).await?;
            Ok::<_, StorageError>(result.rows_affected())
        };
        let deleted = self.bounded("delete_all_applicants", delete).await?;
        tracing::info!(deleted, "deleted all applicants");
        Ok(deleted)
    }
}
