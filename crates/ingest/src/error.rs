//! Ingestion errors.

use std::path::PathBuf;

/// Error type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

/// Errors that can occur while reading an upload.
///
/// None of these are fatal to a session: the caller reports them and waits
/// for the next upload.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a readable spreadsheet
    #[error("unreadable spreadsheet: {0}")]
    Workbook(#[from] calamine::Error),

    /// No worksheet, or a worksheet without a header row
    #[error("spreadsheet has no worksheet with data")]
    EmptyWorkbook,

    /// Required columns are missing from the header row
    #[error("schema mismatch: missing column(s) {}", .missing.join(", "))]
    SchemaMismatch {
        /// Required headers that were not found
        missing: Vec<String>,
        /// Headers present in the sheet
        found: Vec<String>,
    },

    /// Discovery found no spreadsheet
    #[error("no .xlsx file found in {}", .0.display())]
    NoWorkbookFound(PathBuf),
}

impl IngestError {
    /// Whether the error is about the sheet layout rather than the file itself.
    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self, IngestError::SchemaMismatch { .. })
    }
}
