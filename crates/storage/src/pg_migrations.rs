//! PostgreSQL schema migrations for applicant-ingest storage.

use sqlx::PgPool;

/// Run all PostgreSQL migrations.
pub async fn run_pg_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS applicants (
            seq BIGINT GENERATED ALWAYS AS IDENTITY,
            id TEXT PRIMARY KEY,
            applicant_name TEXT,
            district TEXT,
            taluka TEXT,
            year BIGINT,
            portal TEXT,
            scheme_name TEXT,
            application_date TEXT,
            status TEXT,
            amount_sanctioned DOUBLE PRECISION,
            beneficiary_category TEXT,
            gender TEXT,
            age BIGINT,
            mobile TEXT,
            email TEXT,
            aadhaar_no TEXT,
            upload_date TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Sparse uniqueness: rows without a key never collide.
    sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_applicants_aadhaar ON applicants (aadhaar_no)
           WHERE aadhaar_no IS NOT NULL AND aadhaar_no <> ''",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_applicants_upload_date ON applicants (upload_date DESC, seq DESC)",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_applicants_district ON applicants (district)")
        .execute(pool)
        .await?;

    Ok(())
}
