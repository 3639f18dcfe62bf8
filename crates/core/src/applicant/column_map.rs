//! Spreadsheet column labels to canonical record fields.

use chrono::{DateTime, Utc};

use super::{ApplicantRecord, CellValue, RawRow};

/// Header labels understood by the mapper, paired with the record field
/// they populate. Any other label is ignored.
pub const COLUMN_MAP: [(&str, &str); 15] = [
    ("Applicant Name", "applicantName"),
    ("District", "district"),
    ("Taluka", "taluka"),
    ("Year", "year"),
    ("Portal", "portal"),
    ("Scheme Name", "schemeName"),
    ("Application Date", "applicationDate"),
    ("Status", "status"),
    ("Amount Sanctioned", "amountSanctioned"),
    ("Beneficiary Category", "beneficiaryCategory"),
    ("Gender", "gender"),
    ("Age", "age"),
    ("Mobile", "mobile"),
    ("Email", "email"),
    ("Aadhaar No", "aadhaarNo"),
];

fn text(row: &RawRow, label: &str) -> Option<String> {
    row.get(label).and_then(CellValue::as_text)
}

fn integer(row: &RawRow, label: &str) -> Option<i64> {
    row.get(label).and_then(CellValue::as_i64)
}

fn decimal(row: &RawRow, label: &str) -> Option<f64> {
    row.get(label).and_then(CellValue::as_f64)
}

/// Maps one decoded row onto an [`ApplicantRecord`].
///
/// Total over its input: missing or unconvertible cells become absent
/// fields. `upload_date` comes from the caller, never from the row.
#[must_use]
pub fn map_row(row: &RawRow, upload_date: DateTime<Utc>) -> ApplicantRecord {
    ApplicantRecord {
        applicant_name: text(row, "Applicant Name"),
        district: text(row, "District"),
        taluka: text(row, "Taluka"),
        year: integer(row, "Year"),
        portal: text(row, "Portal"),
        scheme_name: text(row, "Scheme Name"),
        application_date: text(row, "Application Date"),
        status: text(row, "Status"),
        amount_sanctioned: decimal(row, "Amount Sanctioned"),
        beneficiary_category: text(row, "Beneficiary Category"),
        gender: text(row, "Gender"),
        age: integer(row, "Age"),
        mobile: text(row, "Mobile"),
        email: text(row, "Email"),
        aadhaar_no: text(row, "Aadhaar No"),
        upload_date,
    }
}

/// Maps a whole batch, stamping every record with the same `upload_date`.
#[must_use]
pub fn map_rows(rows: &[RawRow], upload_date: DateTime<Utc>) -> Vec<ApplicantRecord> {
    rows.iter().map(|row| map_row(row, upload_date)).collect()
}
