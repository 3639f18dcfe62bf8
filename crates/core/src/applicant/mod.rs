//! Applicant record types and the storage-free ingest stages.

mod cell;
mod column_map;
mod reconcile;

pub use cell::{CellValue, RawRow};
pub use column_map::{COLUMN_MAP, map_row, map_rows};
pub use reconcile::reconcile;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical applicant record, as produced by the column mapper.
///
/// Every input-derived field is optional. `upload_date` is always set by
/// the system at ingestion time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantRecord {
    pub applicant_name: Option<String>,
    pub district: Option<String>,
    pub taluka: Option<String>,
    pub year: Option<i64>,
    pub portal: Option<String>,
    pub scheme_name: Option<String>,
    pub application_date: Option<String>,
    pub status: Option<String>,
    pub amount_sanctioned: Option<f64>,
    pub beneficiary_category: Option<String>,
    pub gender: Option<String>,
    pub age: Option<i64>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub aadhaar_no: Option<String>,
    pub upload_date: DateTime<Utc>,
}

impl ApplicantRecord {
    /// Creates a record with every optional field absent.
    #[must_use]
    pub fn empty(upload_date: DateTime<Utc>) -> Self {
        Self {
            applicant_name: None,
            district: None,
            taluka: None,
            year: None,
            portal: None,
            scheme_name: None,
            application_date: None,
            status: None,
            amount_sanctioned: None,
            beneficiary_category: None,
            gender: None,
            age: None,
            mobile: None,
            email: None,
            aadhaar_no: None,
            upload_date,
        }
    }

    /// Deduplication key: the Aadhaar number when present and non-empty.
    #[must_use]
    pub fn dedup_key(&self) -> Option<&str> {
        self.aadhaar_no.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }

    /// The key with all but its last four characters starred, for logs.
    /// Keys of four characters or fewer are starred entirely.
    #[must_use]
    pub fn masked_key(&self) -> Option<String> {
        self.dedup_key().map(|key| {
            let len = key.chars().count();
            let shown = if len > 4 { 4 } else { 0 };
            key.chars().enumerate().map(|(i, c)| if i + shown >= len { c } else { '*' }).collect()
        })
    }
}

/// An applicant record as persisted, with its storage-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredApplicant {
    pub id: String,
    #[serde(flatten)]
    pub record: ApplicantRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_key_ignores_blank_values() {
        let mut record = ApplicantRecord::empty(Utc::now());
        assert_eq!(record.dedup_key(), None);
        record.aadhaar_no = Some("   ".to_owned());
        assert_eq!(record.dedup_key(), None);
        record.aadhaar_no = Some(" 1234 ".to_owned());
        assert_eq!(record.dedup_key(), Some("1234"));
    }

    #[test]
    fn masked_key_keeps_only_last_four() {
        let mut record = ApplicantRecord::empty(Utc::now());
        assert_eq!(record.masked_key(), None);
        record.aadhaar_no = Some(" 123456789012 ".to_owned());
        assert_eq!(record.masked_key().as_deref(), Some("********9012"));
        record.aadhaar_no = Some("1234".to_owned());
        assert_eq!(record.masked_key().as_deref(), Some("****"));
    }

    #[test]
    fn stored_applicant_flattens_record() {
        let mut record = ApplicantRecord::empty(Utc::now());
        record.applicant_name = Some("Asha".to_owned());
        let stored = StoredApplicant { id: "abc".to_owned(), record };
        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["applicantName"], "Asha");
        assert!(json["uploadDate"].is_string());
    }
}
