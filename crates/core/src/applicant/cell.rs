//! Decoded spreadsheet cells and rows.

use std::collections::BTreeMap;

/// A non-empty cell value as read from a spreadsheet.
///
/// Empty cells are never represented; a missing key in [`RawRow`] means
/// the cell was absent or blank.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

/// One data row keyed by the sheet's header labels.
pub type RawRow = BTreeMap<String, CellValue>;

impl CellValue {
    /// Renders the cell as trimmed text. Blank text yields `None`.
    ///
    /// Integral numbers render without a fractional part so that numeric
    /// identifiers (Aadhaar, mobile) survive a round trip through a number cell.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_owned())
            },
            Self::Number(n) => Some(format_number(*n)),
            Self::Bool(b) => Some(b.to_string()),
        }
    }

    /// Interprets the cell as a float. Text is parsed after trimming.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            Self::Number(_) | Self::Bool(_) => None,
        }
    }

    /// Interprets the cell as an integer. Fractional values are rejected.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        let value = self.as_f64()?;
        if value.fract() != 0.0 || value.abs() > MAX_EXACT_INTEGER {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, reason = "bounded by MAX_EXACT_INTEGER")]
        let integer = value as i64;
        Some(integer)
    }
}

/// Largest magnitude at which every integer is representable in an `f64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() <= MAX_EXACT_INTEGER {
        format!("{n:.0}")
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_number_renders_without_fraction() {
        assert_eq!(CellValue::Number(123_456_789_012.0).as_text().as_deref(), Some("123456789012"));
        assert_eq!(CellValue::Number(12.5).as_text().as_deref(), Some("12.5"));
    }

    #[test]
    fn blank_text_is_absent() {
        assert_eq!(CellValue::Text("  ".to_owned()).as_text(), None);
        assert_eq!(CellValue::Text(" Pune ".to_owned()).as_text().as_deref(), Some("Pune"));
    }

    #[test]
    fn numbers_stored_as_text_parse() {
        assert_eq!(CellValue::Text(" 2023 ".to_owned()).as_i64(), Some(2023));
        assert_eq!(CellValue::Text("25000.50".to_owned()).as_f64(), Some(25_000.5));
        assert_eq!(CellValue::Text("n/a".to_owned()).as_f64(), None);
    }

    #[test]
    fn fractional_value_is_not_an_integer() {
        assert_eq!(CellValue::Number(34.5).as_i64(), None);
        assert_eq!(CellValue::Number(34.0).as_i64(), Some(34));
        assert_eq!(CellValue::Bool(true).as_i64(), None);
    }
}
