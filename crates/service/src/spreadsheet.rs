//! Spreadsheet decoding: raw upload bytes into header-keyed rows.
//!
//! Only the first worksheet is read. Its first non-empty row is the header;
//! every following non-blank row becomes one [`RawRow`]. Empty and error
//! cells are left out of the row instead of failing it.

use std::collections::HashMap;
use std::io::Cursor;

use applicant_ingest_core::{COLUMN_MAP, CellValue, RawRow};
use calamine::{Data, Reader, open_workbook_auto_from_rs};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes are not a workbook calamine recognizes.
    #[error("Failed to read Excel file: {0}")]
    Malformed(#[from] calamine::Error),

    #[error("Excel file contains no worksheets")]
    NoWorksheet,

    /// The first worksheet has a header row at most.
    #[error("Excel file is empty")]
    EmptySheet,
}

/// Decodes the first worksheet of an `.xls`/`.xlsx`/`.ods` buffer.
pub fn decode(bytes: &[u8]) -> Result<Vec<RawRow>, DecodeError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let range = workbook.worksheet_range_at(0).ok_or(DecodeError::NoWorksheet)??;

    let mut sheet_rows = range.rows();
    let Some(header_row) = sheet_rows.next() else {
        return Err(DecodeError::EmptySheet);
    };
    let headers = header_labels(header_row);
    warn_missing_columns(&headers);

    let rows: Vec<RawRow> = sheet_rows
        .map(|cells| {
            headers
                .iter()
                .zip(cells)
                .filter_map(|(label, cell)| Some((label.clone()?, to_cell_value(cell)?)))
                .collect::<RawRow>()
        })
        .filter(|row| !row.is_empty())
        .collect();

    if rows.is_empty() {
        return Err(DecodeError::EmptySheet);
    }
    tracing::debug!(rows = rows.len(), columns = headers.len(), "decoded worksheet");
    Ok(rows)
}

/// Header labels by column position. Blank headers yield `None` so their
/// column is ignored; repeated labels get `_1`, `_2`, ... suffixes.
fn header_labels(header_row: &[Data]) -> Vec<Option<String>> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    header_row
        .iter()
        .map(|cell| {
            let label = match to_cell_value(cell)? {
                CellValue::Text(s) => s.trim().to_owned(),
                other => other.as_text()?,
            };
            if label.is_empty() {
                return None;
            }
            let count = seen.entry(label.clone()).or_insert(0);
            let unique = if *count == 0 { label } else { format!("{label}_{count}") };
            *count += 1;
            Some(unique)
        })
        .collect()
}

fn warn_missing_columns(headers: &[Option<String>]) {
    let missing: Vec<&str> = COLUMN_MAP
        .iter()
        .map(|(label, _)| *label)
        .filter(|label| !headers.iter().flatten().any(|h| h == label))
        .collect();
    if !missing.is_empty() {
        tracing::warn!(?missing, "worksheet is missing known columns; those fields will be empty");
    }
}

fn to_cell_value(cell: &Data) -> Option<CellValue> {
    match cell {
        Data::Int(i) => {
            #[allow(clippy::cast_precision_loss, reason = "spreadsheet numbers are f64 already")]
            let number = *i as f64;
            Some(CellValue::Number(number))
        },
        Data::Float(f) => Some(CellValue::Number(*f)),
        Data::DateTime(dt) => Some(CellValue::Number(dt.as_f64())),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            (!s.trim().is_empty()).then(|| CellValue::Text(s.clone()))
        },
        Data::Bool(b) => Some(CellValue::Bool(*b)),
        Data::Error(_) | Data::Empty => None,
    }
}
