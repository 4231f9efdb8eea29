//! Spreadsheet decoding via calamine.

use crate::convert::parse_timestamp;
use crate::error::{IngestError, Result};
use crate::table::{Cell, Table};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;
use tracing::debug;

const MINUTES_PER_DAY: f64 = 1440.0;

/// Decode the first worksheet of an `.xlsx`, `.xls` or `.ods` file.
pub fn read_first_sheet(bytes: Vec<u8>) -> Result<Table> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let names = workbook.sheet_names();
    debug!("Workbook sheets: {:?}", names);

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(IngestError::EmptyWorkbook)??;

    let grid = range
        .rows()
        .map(|row| row.iter().map(convert_cell).collect())
        .collect();

    Table::from_grid(grid)
}

fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => {
            // Bare times of day carry no date part; they are durations in this export.
            if dt.is_duration() || dt.as_f64() < 1.0 {
                Cell::Duration(dt.as_f64() * MINUTES_PER_DAY)
            } else {
                dt.as_datetime().map_or(Cell::Empty, Cell::DateTime)
            }
        }
        Data::DateTimeIso(s) => parse_timestamp(s).map_or_else(|| Cell::Text(s.clone()), Cell::DateTime),
        Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{ExcelDateTime, ExcelDateTimeType};
    use chrono::NaiveDateTime;

    #[test]
    fn test_garbage_is_a_workbook_error() {
        let err = read_first_sheet(b"definitely not a spreadsheet".to_vec()).unwrap_err();
        assert!(matches!(err, IngestError::Workbook(_)));
    }

    #[test]
    fn test_convert_plain_cells() {
        assert_eq!(convert_cell(&Data::String("Naura".into())), Cell::text("Naura"));
        assert_eq!(convert_cell(&Data::Int(3)), Cell::Number(3.0));
        assert_eq!(convert_cell(&Data::Empty), Cell::Empty);
    }

    #[test]
    fn test_convert_date_cells() {
        let entry = Data::DateTime(ExcelDateTime::new(45860.375, ExcelDateTimeType::DateTime, false));
        let expected = NaiveDateTime::parse_from_str("2025-07-22 09:00", "%Y-%m-%d %H:%M").unwrap();
        assert_eq!(convert_cell(&entry), Cell::DateTime(expected));

        // 3 minutes as a time-of-day and as an elapsed-time format
        let clock = Data::DateTime(ExcelDateTime::new(3.0 / 1440.0, ExcelDateTimeType::DateTime, false));
        let elapsed = Data::DateTime(ExcelDateTime::new(3.0 / 1440.0, ExcelDateTimeType::TimeDelta, false));
        for data in [clock, elapsed] {
            match convert_cell(&data) {
                Cell::Duration(minutes) => assert!((minutes - 3.0).abs() < 1e-9),
                other => panic!("expected a duration, got {other:?}"),
            }
        }

        // elapsed-time formats stay durations past one day
        let long = Data::DateTime(ExcelDateTime::new(1.5, ExcelDateTimeType::TimeDelta, false));
        assert_eq!(convert_cell(&long), Cell::Duration(2160.0));

        assert_eq!(
            convert_cell(&Data::DateTimeIso("2025-07-22T09:00:00".into())),
            Cell::DateTime(expected)
        );
        assert_eq!(convert_cell(&Data::DateTimeIso("sometime".into())), Cell::text("sometime"));
    }
}
