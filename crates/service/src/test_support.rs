//! Fixture workbooks built in memory.

use rust_xlsxwriter::Workbook;

/// One fixture cell.
#[derive(Clone, Copy)]
pub enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    Blank,
}

/// Builds an `.xlsx` buffer whose first sheet holds `header` then `rows`.
#[expect(clippy::unwrap_used, reason = "test code")]
pub fn xlsx(header: &[&str], rows: &[Vec<Cell<'_>>]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, label) in (0_u16..).zip(header) {
        sheet.write_string(0, col, *label).unwrap();
    }
    for (row_idx, row) in (1_u32..).zip(rows) {
        for (col, cell) in (0_u16..).zip(row) {
            match *cell {
                Cell::Text(s) => {
                    sheet.write_string(row_idx, col, s).unwrap();
                },
                Cell::Number(n) => {
                    sheet.write_number(row_idx, col, n).unwrap();
                },
                Cell::Blank => {},
            }
        }
    }
    workbook.save_to_buffer().unwrap()
}

/// Sheet with the key and name columns only.
pub fn keyed_sheet(rows: &[(&str, &str)]) -> Vec<u8> {
    let rows: Vec<Vec<Cell<'_>>> =
        rows.iter().map(|(key, name)| vec![Cell::Text(key), Cell::Text(name)]).collect();
    xlsx(&["Aadhaar No", "Applicant Name"], &rows)
}
