//! Day filter: all data, or a single calendar date.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Error returned when a day filter cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid day filter '{0}': expected 'all', YYYY-MM-DD or DD/MM/YYYY")]
pub struct ParseDayFilterError(pub String);

/// Restricts aggregation to one calendar date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayFilter {
    /// Every record
    #[default]
    All,
    /// Only records on this date
    Day(NaiveDate),
}

impl DayFilter {
    /// Whether a timestamp passes the filter.
    pub fn matches(&self, timestamp: &NaiveDateTime) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Day(date) => timestamp.date() == *date,
        }
    }

    /// The selected date, if any.
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            DayFilter::All => None,
            DayFilter::Day(date) => Some(*date),
        }
    }
}

impl From<Option<NaiveDate>> for DayFilter {
    fn from(date: Option<NaiveDate>) -> Self {
        date.map_or(DayFilter::All, DayFilter::Day)
    }
}

impl std::str::FromStr for DayFilter {
    type Err = ParseDayFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(DayFilter::All);
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%Y"))
            .map(DayFilter::Day)
            .map_err(|_| ParseDayFilterError(s.to_string()))
    }
}

impl std::fmt::Display for DayFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayFilter::All => f.write_str("all"),
            DayFilter::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}
