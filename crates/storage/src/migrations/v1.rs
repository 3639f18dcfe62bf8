//! Migration v1: applicants table

pub(super) const SQL: &str = "
CREATE TABLE IF NOT EXISTS applicants (
    id TEXT PRIMARY KEY,
    applicant_name TEXT,
    district TEXT,
    taluka TEXT,
    year INTEGER,
    portal TEXT,
    scheme_name TEXT,
    application_date TEXT,
    status TEXT,
    amount_sanctioned REAL,
    beneficiary_category TEXT,
    gender TEXT,
    age INTEGER,
    mobile TEXT,
    email TEXT,
    aadhaar_no TEXT,
    upload_date TEXT NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_applicants_aadhaar
    ON applicants(aadhaar_no)
    WHERE aadhaar_no IS NOT NULL AND aadhaar_no <> '';

CREATE INDEX IF NOT EXISTS idx_applicants_upload_date ON applicants(upload_date DESC);
CREATE INDEX IF NOT EXISTS idx_applicants_district ON applicants(district);
";
