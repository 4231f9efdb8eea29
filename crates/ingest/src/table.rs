//! Decoded sheet contents, independent of the spreadsheet library.

use crate::error::{IngestError, Result};
use chrono::NaiveDateTime;

/// A single decoded cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Blank cell
    Empty,
    /// Text
    Text(String),
    /// Plain number
    Number(f64),
    /// Boolean
    Bool(bool),
    /// Cell formatted as a date-time
    DateTime(NaiveDateTime),
    /// Cell formatted as a duration or bare time of day, in minutes
    Duration(f64),
}

impl Cell {
    /// Shorthand for a text cell.
    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

    /// Whether the cell carries nothing.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Cell rendered as text, the way a header or name column is read.
    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(n) if n.fract() == 0.0 => format!("{}", *n as i64),
            Cell::Number(n) => n.to_string(),
            Cell::Bool(b) => b.to_string(),
            Cell::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            Cell::Duration(m) => m.to_string(),
        }
    }
}

/// Header row plus data rows of one worksheet.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Create a table from headers and rows.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { headers, rows }
    }

    /// Build a table from a raw grid.
    ///
    /// The first row with any content is the header row; everything after it
    /// is data.
    pub fn from_grid(grid: Vec<Vec<Cell>>) -> Result<Self> {
        let mut rows = grid.into_iter();
        let header = rows
            .by_ref()
            .find(|row| row.iter().any(|c| !c.is_blank()))
            .ok_or(IngestError::EmptyWorkbook)?;

        Ok(Self {
            headers: header.iter().map(Cell::as_text).collect(),
            rows: rows.collect(),
        })
    }

    /// Header names.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }
}
