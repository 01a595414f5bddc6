//! XLSX (Microsoft Excel) text extraction
//!
//! Uses the `calamine` crate for workbook parsing. Every worksheet is written
//! as a `--- Sheet: {name} ---` line followed by its rows, one line per row
//! and one tab-separated field per column, starting from cell A1 so that
//! leading empty rows and columns keep their place.

use crate::traits::{BackendOptions, DocumentBackend};
use crate::utils::backend_error;
use calamine::{open_workbook_from_rs, Data, Range, Reader, SheetType, Xlsx};
use chrono::{Datelike, Timelike};
use doctext_core::{DoctextError, InputFormat};
use log::debug;
use std::fmt::Write;
use std::io::Cursor;

/// XLSX backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct XlsxBackend;

impl XlsxBackend {
    /// Create a new XLSX backend
    #[inline]
    #[must_use = "creates a new XLSX backend"]
    pub const fn new() -> Self {
        Self
    }

    /// Render one cell value as text
    ///
    /// Whole numbers print without a fractional part, booleans as
    /// `True`/`False`, dates as `YYYY-MM-DD HH:MM:SS` and error cells as their
    /// Excel code. Empty cells render as an empty string.
    #[must_use = "returns the text of the cell"]
    pub fn cell_text(cell: &Data) -> String {
        match cell {
            Data::Empty => String::new(),
            Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
            Data::Int(i) => i.to_string(),
            Data::Float(f) => float_text(*f),
            Data::Bool(true) => "True".to_string(),
            Data::Bool(false) => "False".to_string(),
            Data::DateTime(dt) if dt.is_duration() => dt.as_duration().map_or_else(
                || dt.to_string(),
                |d| {
                    let secs = d.num_seconds();
                    format!("{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
                },
            ),
            Data::DateTime(dt) => dt.as_datetime().map_or_else(
                || dt.to_string(),
                |d| {
                    format!(
                        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
                        d.year(),
                        d.month(),
                        d.day(),
                        d.hour(),
                        d.minute(),
                        d.second()
                    )
                },
            ),
            Data::Error(e) => e.to_string(),
        }
    }

    /// Render a worksheet: header line, one line per row, then a blank line
    #[must_use = "returns the text of the sheet"]
    pub fn sheet_text(name: &str, range: &Range<Data>) -> String {
        let mut text = format!("--- Sheet: {name} ---\n");

        if let Some((last_row, last_col)) = range.end() {
            for row in 0..=last_row {
                let line = (0..=last_col)
                    .map(|col| range.get_value((row, col)).map(Self::cell_text).unwrap_or_default())
                    .collect::<Vec<_>>()
                    .join("\t");
                let _ = writeln!(text, "{line}");
            }
        }

        text.push('\n');
        text
    }
}

/// Shortest text for a float, switching to exponent form (`1e+20`, `1e-07`)
/// below 1e-4 and from 1e16 upwards
fn float_text(value: f64) -> String {
    let magnitude = value.abs();
    if value.is_finite() && value != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let repr = format!("{value:e}");
        if let Some((mantissa, exponent)) = repr.split_once('e') {
            let (sign, digits) = exponent
                .strip_prefix('-')
                .map_or(("+", exponent), |digits| ("-", digits));
            return format!("{mantissa}e{sign}{digits:0>2}");
        }
    }
    value.to_string()
}

impl DocumentBackend for XlsxBackend {
    #[inline]
    fn format(&self) -> InputFormat {
        InputFormat::Xlsx
    }

    fn extract_text(&self, data: &[u8], _options: &BackendOptions) -> Result<String, DoctextError> {
        let mut workbook: Xlsx<_> =
            open_workbook_from_rs(Cursor::new(data)).map_err(|e| backend_error("open", "XLSX", e))?;

        let sheet_names: Vec<String> = workbook
            .sheets_metadata()
            .iter()
            .filter(|sheet| sheet.typ == SheetType::WorkSheet)
            .map(|sheet| sheet.name.clone())
            .collect();
        debug!("XLSX workbook has {} worksheet(s)", sheet_names.len());

        let mut text = String::new();
        for name in &sheet_names {
            let range = workbook
                .worksheet_range(name)
                .map_err(|e| backend_error("read sheet", name, e))?;
            text.push_str(&Self::sheet_text(name, &range));
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{CellErrorType, ExcelDateTime, ExcelDateTimeType};

    #[test]
    fn test_cell_text_numbers() {
        assert_eq!(XlsxBackend::cell_text(&Data::Float(42.0)), "42");
        assert_eq!(XlsxBackend::cell_text(&Data::Float(3.25)), "3.25");
        assert_eq!(XlsxBackend::cell_text(&Data::Float(-0.5)), "-0.5");
        assert_eq!(XlsxBackend::cell_text(&Data::Int(7)), "7");
    }

    #[test]
    fn test_cell_text_extreme_magnitudes() {
        assert_eq!(XlsxBackend::cell_text(&Data::Float(1e20)), "1e+20");
        assert_eq!(XlsxBackend::cell_text(&Data::Float(1e-7)), "1e-07");
        assert_eq!(XlsxBackend::cell_text(&Data::Float(-2.5e-10)), "-2.5e-10");
        assert_eq!(XlsxBackend::cell_text(&Data::Float(1.5e300)), "1.5e+300");
        assert_eq!(XlsxBackend::cell_text(&Data::Float(0.0001)), "0.0001");
        assert_eq!(
            XlsxBackend::cell_text(&Data::Float(1e15)),
            "1000000000000000"
        );
        assert_eq!(XlsxBackend::cell_text(&Data::Float(0.0)), "0");
    }

    #[test]
    fn test_cell_text_other_values() {
        assert_eq!(XlsxBackend::cell_text(&Data::Empty), "");
        assert_eq!(XlsxBackend::cell_text(&Data::String("Q1".to_string())), "Q1");
        assert_eq!(XlsxBackend::cell_text(&Data::Bool(true)), "True");
        assert_eq!(XlsxBackend::cell_text(&Data::Bool(false)), "False");
        assert_eq!(
            XlsxBackend::cell_text(&Data::Error(CellErrorType::Div0)),
            "#DIV/0!"
        );
    }

    #[test]
    fn test_cell_text_dates() {
        let noon = ExcelDateTime::new(45000.5, ExcelDateTimeType::DateTime, false);
        assert_eq!(
            XlsxBackend::cell_text(&Data::DateTime(noon)),
            "2023-03-15 12:00:00"
        );

        let ninety_minutes = ExcelDateTime::new(0.0625, ExcelDateTimeType::TimeDelta, false);
        assert_eq!(
            XlsxBackend::cell_text(&Data::DateTime(ninety_minutes)),
            "1:30:00"
        );
    }

    #[test]
    fn test_sheet_text_pads_from_a1() {
        // Values at B2 and C3 only
        let mut range = Range::new((1, 1), (2, 2));
        range.set_value((1, 1), Data::String("x".to_string()));
        range.set_value((2, 2), Data::Float(1.0));

        assert_eq!(
            XlsxBackend::sheet_text("Data", &range),
            "--- Sheet: Data ---\n\t\t\n\tx\t\n\t\t1\n\n"
        );
    }

    #[test]
    fn test_sheet_text_empty_sheet() {
        assert_eq!(
            XlsxBackend::sheet_text("Blank", &Range::empty()),
            "--- Sheet: Blank ---\n\n"
        );
    }

    #[test]
    fn test_extract_text_rejects_non_zip() {
        let err = XlsxBackend::new()
            .extract_text(b"\x00\x01\x02", &BackendOptions::default())
            .expect_err("not a workbook");
        assert!(err.to_string().contains("Failed to open XLSX"));
    }
}
