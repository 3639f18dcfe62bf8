//! Request/query types (Deserialize)
//!
//! Query values arrive as strings and are parsed leniently: a value that
//! is not a positive integer is treated as missing.

use applicant_ingest_core::ApplicantFilter;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub district: Option<String>,
    pub taluka: Option<String>,
    pub status: Option<String>,
    pub year: Option<String>,
    pub gender: Option<String>,
    pub scheme_name: Option<String>,
    pub beneficiary_category: Option<String>,
    pub search: Option<String>,
}

fn parse_number<T: std::str::FromStr>(value: Option<&str>) -> Option<T> {
    value.and_then(|v| v.trim().parse().ok())
}

impl DataQuery {
    pub fn page(&self) -> Option<u64> {
        parse_number(self.page.as_deref())
    }

    pub fn limit(&self) -> Option<u64> {
        parse_number(self.limit.as_deref())
    }

    pub fn into_filter(self) -> ApplicantFilter {
        ApplicantFilter {
            year: parse_number(self.year.as_deref()),
            district: self.district,
            taluka: self.taluka,
            status: self.status,
            gender: self.gender,
            scheme_name: self.scheme_name,
            beneficiary_category: self.beneficiary_category,
            search: self.search,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparsable_numbers_are_missing() {
        let query = DataQuery {
            page: Some("two".to_owned()),
            limit: Some("-5".to_owned()),
            year: Some("20x3".to_owned()),
            ..DataQuery::default()
        };
        assert_eq!(query.page(), None);
        assert_eq!(query.limit(), None);
        assert_eq!(query.into_filter().year, None);
    }

    #[test]
    fn numbers_and_filters_are_carried_over() {
        let query = DataQuery {
            page: Some(" 3 ".to_owned()),
            limit: Some("25".to_owned()),
            year: Some("2024".to_owned()),
            scheme_name: Some("PMAY".to_owned()),
            ..DataQuery::default()
        };
        assert_eq!(query.page(), Some(3));
        assert_eq!(query.limit(), Some(25));
        let filter = query.into_filter();
        assert_eq!(filter.year, Some(2024));
        assert_eq!(filter.scheme_name.as_deref(), Some("PMAY"));
    }
}
