use applicant_ingest_core::CellValue;

use crate::spreadsheet::{DecodeError, decode};
use crate::test_support::{Cell, keyed_sheet, xlsx};

#[test]
#[expect(clippy::unwrap_used, reason = "test code")]
fn rows_are_keyed_by_header_labels() {
    let bytes = xlsx(
        &["Applicant Name", "Year", "Aadhaar No"],
        &[vec![Cell::Text("Asha"), Cell::Number(2023.0), Cell::Number(123_412_341_234.0)]],
    );

    let rows = decode(&bytes).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("Applicant Name"), Some(&CellValue::Text("Asha".to_owned())));
    assert_eq!(rows[0].get("Year"), Some(&CellValue::Number(2023.0)));
    assert_eq!(rows[0].get("Aadhaar No"), Some(&CellValue::Number(123_412_341_234.0)));
}

#[test]
#[expect(clippy::unwrap_used, reason = "test code")]
fn missing_cells_are_absent_not_errors() {
    let bytes = xlsx(
        &["Applicant Name", "District", "Mobile"],
        &[
            vec![Cell::Text("Ravi"), Cell::Blank, Cell::Text("9800000000")],
            vec![Cell::Blank, Cell::Text("Pune")],
        ],
    );

    let rows = decode(&bytes).unwrap();

    assert_eq!(rows.len(), 2);
    assert!(!rows[0].contains_key("District"));
    assert_eq!(rows[1].len(), 1);
    assert_eq!(rows[1].get("District"), Some(&CellValue::Text("Pune".to_owned())));
}

#[test]
#[expect(clippy::unwrap_used, reason = "test code")]
fn blank_rows_are_skipped() {
    let bytes = xlsx(
        &["Applicant Name"],
        &[vec![Cell::Text("first")], vec![Cell::Blank], vec![Cell::Text("third")]],
    );

    let rows = decode(&bytes).unwrap();
    assert_eq!(rows.len(), 2);
}

#[test]
#[expect(clippy::unwrap_used, reason = "test code")]
fn repeated_headers_get_suffixes() {
    let bytes = xlsx(&["Mobile", "Mobile"], &[vec![Cell::Text("1"), Cell::Text("2")]]);

    let rows = decode(&bytes).unwrap();

    assert_eq!(rows[0].get("Mobile"), Some(&CellValue::Text("1".to_owned())));
    assert_eq!(rows[0].get("Mobile_1"), Some(&CellValue::Text("2".to_owned())));
}

#[test]
fn header_only_sheet_is_empty() {
    let bytes = keyed_sheet(&[]);
    assert!(matches!(decode(&bytes), Err(DecodeError::EmptySheet)));
}

#[test]
fn non_spreadsheet_bytes_are_malformed() {
    let bytes = b"name,aadhaar\nAsha,1234\n";
    assert!(matches!(decode(bytes), Err(DecodeError::Malformed(_))));
}

#[test]
fn empty_buffer_is_malformed() {
    assert!(matches!(decode(&[]), Err(DecodeError::Malformed(_))));
}
