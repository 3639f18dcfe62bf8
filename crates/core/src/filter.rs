//! Listing filter for persisted applicants.

use serde::{Deserialize, Serialize};

/// Field filters for the listing query.
///
/// Text filters are case-insensitive substring matches. `year` is exact.
/// `search` matches any of name, mobile, email or Aadhaar number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taluka: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beneficiary_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ApplicantFilter {
    /// Drops blank text filters so they do not constrain the query.
    #[must_use]
    pub fn normalized(self) -> Self {
        fn keep(value: Option<String>) -> Option<String> {
            value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
        }
        Self {
            district: keep(self.district),
            taluka: keep(self.taluka),
            status: keep(self.status),
            year: self.year,
            gender: keep(self.gender),
            scheme_name: keep(self.scheme_name),
            beneficiary_category: keep(self.beneficiary_category),
            search: keep(self.search),
        }
    }

    /// Text filters as `(column, needle)` pairs, in a fixed order.
    #[must_use]
    pub fn text_filters(&self) -> Vec<(&'static str, &str)> {
        [
            ("district", self.district.as_deref()),
            ("taluka", self.taluka.as_deref()),
            ("status", self.status.as_deref()),
            ("gender", self.gender.as_deref()),
            ("scheme_name", self.scheme_name.as_deref()),
            ("beneficiary_category", self.beneficiary_category.as_deref()),
        ]
        .into_iter()
        .filter_map(|(column, value)| value.map(|v| (column, v)))
        .collect()
    }
}

/// Columns matched by the free-text `search` filter.
pub const SEARCH_COLUMNS: [&str; 4] = ["applicant_name", "mobile", "email", "aadhaar_no"];
