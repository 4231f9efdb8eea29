//! Cell to field conversions: timestamps and wait times.

use crate::table::Cell;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use deskpulse_core::WaitTime;

/// Text layouts accepted for the entry timestamp, tried in order.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

const MINUTES_PER_DAY: f64 = 1440.0;

/// First serial past 9999-12-31, the last date Excel can hold.
const SERIAL_LIMIT: f64 = 2_958_466.0;

/// Convert an Excel serial date (1900 system) to a date-time.
///
/// Serial 1.0 is 1900-01-01; the epoch is shifted to 1899-12-30 to absorb
/// Excel's phantom 1900-02-29. Fractions are rounded to the nearest second.
/// Numbers outside Excel's date range are not timestamps.
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !(1.0..SERIAL_LIMIT).contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let seconds = (serial * 86_400.0).round() as i64;
    epoch.checked_add_signed(Duration::try_seconds(seconds)?)
}

/// Read the entry timestamp from a cell.
pub fn timestamp_from_cell(cell: &Cell) -> Option<NaiveDateTime> {
    match cell {
        Cell::DateTime(dt) => Some(*dt),
        Cell::Number(serial) => excel_serial_to_datetime(*serial),
        Cell::Text(text) => parse_timestamp(text),
        _ => None,
    }
}

/// Parse timestamp text in any of the accepted layouts.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
}

/// Read the wait after assignment from a cell.
///
/// Numbers are taken as Excel durations, i.e. fractions of a day.
pub fn wait_from_cell(cell: &Cell) -> Option<WaitTime> {
    match cell {
        Cell::Text(text) => WaitTime::parse(text),
        Cell::Duration(minutes) => WaitTime::from_minutes(*minutes),
        Cell::Number(days) => WaitTime::from_minutes(days * MINUTES_PER_DAY),
        _ => None,
    }
}
