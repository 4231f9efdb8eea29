//! Ingestion adapter for deskpulse.
//!
//! Decodes an uploaded spreadsheet into a [`Table`], maps its columns and
//! builds the immutable [`deskpulse_core::RecordSet`] the metrics engine
//! works on.

#![warn(missing_docs)]

pub mod error;
pub mod table;
pub mod schema;
pub mod convert;
pub mod workbook;
pub mod source;
pub mod discover;
pub mod ingestor;

pub use error::{IngestError, Result};
pub use table::{Cell, Table};
pub use schema::{ColumnMapping, ColumnIndices};
pub use source::{TableSource, WorkbookFile, InMemoryTable};
pub use discover::discover_workbook;
pub use ingestor::Ingestor;
