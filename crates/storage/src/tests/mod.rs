//! Test utilities and module declarations for storage tests.

use crate::Storage;
use applicant_ingest_core::ApplicantRecord;
use chrono::{DateTime, Utc};
use tempfile::TempDir;

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_storage() -> (Storage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let storage = Storage::new(&db_path).unwrap();
    (storage, temp_dir)
}

pub fn create_test_applicant(aadhaar: Option<&str>, name: &str) -> ApplicantRecord {
    create_test_applicant_at(aadhaar, name, Utc::now())
}

pub fn create_test_applicant_at(
    aadhaar: Option<&str>,
    name: &str,
    upload_date: DateTime<Utc>,
) -> ApplicantRecord {
    let mut record = ApplicantRecord::empty(upload_date);
    record.applicant_name = Some(name.to_owned());
    record.district = Some("Pune".to_owned());
    record.taluka = Some("Haveli".to_owned());
    record.year = Some(2023);
    record.status = Some("Approved".to_owned());
    record.amount_sanctioned = Some(25_000.0);
    record.gender = Some("F".to_owned());
    record.age = Some(40);
    record.mobile = Some("9876543210".to_owned());
    record.email = Some(format!("{}@example.org", name.to_lowercase()));
    record.aadhaar_no = aadhaar.map(ToOwned::to_owned);
    record
}

mod applicant_tests;
