//! Table sources: where an upload's sheet comes from.

use crate::error::Result;
use crate::table::Table;
use crate::workbook;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Something that yields one decoded sheet.
///
/// This allows different upload origins to feed the same ingestion path.
#[async_trait]
pub trait TableSource: Send + Sync {
    /// Load and decode the sheet.
    async fn load_table(&self) -> Result<Table>;

    /// Short description used in logs and reports.
    fn describe(&self) -> String;
}

/// A spreadsheet file on disk.
#[derive(Debug, Clone)]
pub struct WorkbookFile {
    path: PathBuf,
}

impl WorkbookFile {
    /// Create a source for the file at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TableSource for WorkbookFile {
    async fn load_table(&self) -> Result<Table> {
        let bytes = tokio::fs::read(&self.path).await?;
        debug!("Read {} bytes from {}", bytes.len(), self.path.display());
        workbook::read_first_sheet(bytes)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// A sheet that is already decoded.
#[derive(Debug, Clone)]
pub struct InMemoryTable {
    name: String,
    table: Table,
}

impl InMemoryTable {
    /// Wrap a decoded table.
    pub fn new(name: impl Into<String>, table: Table) -> Self {
        Self {
            name: name.into(),
            table,
        }
    }
}

#[async_trait]
impl TableSource for InMemoryTable {
    async fn load_table(&self) -> Result<Table> {
        Ok(self.table.clone())
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IngestError;

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let source = WorkbookFile::new("/nonexistent/export.xlsx");
        let err = source.load_table().await.unwrap_err();
        assert!(matches!(err, IngestError::Io(_)));
        assert_eq!(source.describe(), "/nonexistent/export.xlsx");
    }

    #[tokio::test]
    async fn test_unreadable_file_is_workbook_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"not a zip archive").unwrap();

        let err = WorkbookFile::new(&path).load_table().await.unwrap_err();
        assert!(matches!(err, IngestError::Workbook(_)));
    }
}
