//! Turns a decoded sheet into a record set.

use crate::convert::{timestamp_from_cell, wait_from_cell};
use crate::error::Result;
use crate::schema::ColumnMapping;
use crate::source::TableSource;
use crate::table::{Cell, Table};
use deskpulse_core::{AgentRoster, IngestStats, InteractionRecord, RecordSet};
use tracing::{debug, info, warn};

/// Builds record sets for a roster and column mapping.
#[derive(Debug, Clone, Default)]
pub struct Ingestor {
    roster: AgentRoster,
    columns: ColumnMapping,
}

impl Ingestor {
    /// Create an ingestor.
    pub fn new(roster: AgentRoster, columns: ColumnMapping) -> Self {
        Self { roster, columns }
    }

    /// Roster rows are matched against.
    pub fn roster(&self) -> &AgentRoster {
        &self.roster
    }

    /// Load a source and build its record set.
    pub async fn ingest<S: TableSource + ?Sized>(&self, source: &S) -> Result<RecordSet> {
        let name = source.describe();
        info!("Loading {}", name);
        let table = source.load_table().await?;
        self.build(name, &table)
    }

    /// Build a record set from a decoded table.
    ///
    /// Rows are kept only when the responsible column names a roster agent and
    /// the timestamp parses; everything else is counted and dropped. Blank rows
    /// are not counted at all.
    pub fn build(&self, source: impl Into<String>, table: &Table) -> Result<RecordSet> {
        let source = source.into();
        let idx = self.columns.locate(table.headers())?;
        if idx.wait.is_none() {
            warn!("{}: no wait column, wait metrics will be empty", source);
        }

        let mut stats = IngestStats::default();
        let mut records = Vec::new();

        for (row_no, row) in table.rows().iter().enumerate() {
            if row.iter().all(Cell::is_blank) {
                continue;
            }
            stats.rows_read += 1;

            let raw_agent = cell(row, idx.agent).as_text();
            let Some(agent) = self.roster.resolve(&raw_agent) else {
                stats.unmatched_agent += 1;
                continue;
            };

            let Some(timestamp) = timestamp_from_cell(cell(row, idx.timestamp)) else {
                debug!("Row {}: unparseable timestamp {:?}", row_no + 1, cell(row, idx.timestamp));
                stats.invalid_timestamp += 1;
                continue;
            };

            let wait = idx.wait.and_then(|i| wait_from_cell(cell(row, i)));
            records.push(InteractionRecord::new(agent.clone(), timestamp).with_wait(wait));
        }

        if stats.invalid_timestamp > 0 {
            warn!(
                "{}: dropped {} row(s) with an invalid timestamp",
                source, stats.invalid_timestamp
            );
        }

        let set = RecordSet::new(source, records, stats);
        info!(
            "Dataset {} from {}: {} record(s), {} row(s) read, {} without a tracked agent",
            set.id(),
            set.source(),
            set.len(),
            stats.rows_read,
            stats.unmatched_agent
        );
        Ok(set)
    }
}

static EMPTY: Cell = Cell::Empty;

fn cell(row: &[Cell], i: usize) -> &Cell {
    row.get(i).unwrap_or(&EMPTY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IngestError;
    use crate::source::InMemoryTable;
    use deskpulse_core::AgentId;

    fn export(rows: Vec<Vec<Cell>>) -> Table {
        let mut grid = vec![vec![
            Cell::text("Responsável da conversa"),
            Cell::text("Data e hora de entrada"),
            Cell::text("Tempo de espera após atribuição"),
        ]];
        grid.extend(rows);
        Table::from_grid(grid).unwrap()
    }

    fn row(agent: &str, when: &str, wait: &str) -> Vec<Cell> {
        vec![Cell::text(agent), Cell::text(when), Cell::text(wait)]
    }

    #[test]
    fn test_build_keeps_tracked_agents_only() {
        let table = export(vec![
            row("Naura Souza", "22/07/2025 09:00", "0:03:00"),
            row("DIESSY", "22/07/2025 14:00", "-"),
            row("Carlos", "22/07/2025 10:00", "0:01:00"),
            row("Naura", "not a date", "0:01:00"),
            vec![Cell::Empty, Cell::text(" "), Cell::Empty],
        ]);

        let set = Ingestor::default().build("test", &table).unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.records()[0].agent, AgentId::new("Naura"));
        assert_eq!(set.records()[0].wait.map(|w| w.minutes()), Some(3.0));
        assert_eq!(set.records()[1].agent, AgentId::new("Diessy"));
        assert!(set.records()[1].wait.is_none());

        let stats = set.stats();
        assert_eq!(stats.rows_read, 4);
        assert_eq!(stats.unmatched_agent, 1);
        assert_eq!(stats.invalid_timestamp, 1);
    }

    #[test]
    fn test_build_counts_out_of_range_serials() {
        let table = export(vec![
            vec![Cell::text("Naura"), Cell::Number(1.0e12), Cell::Number(1.0e12)],
            vec![Cell::text("Diessy"), Cell::Number(45860.375), Cell::Empty],
        ]);

        let set = Ingestor::default().build("test", &table).unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set.records()[0].agent, AgentId::new("Diessy"));
        assert_eq!(set.stats().invalid_timestamp, 1);
    }

    #[test]
    fn test_build_short_rows() {
        let table = export(vec![vec![Cell::text("Naura"), Cell::text("22/07/2025 09:00")]]);
        let set = Ingestor::default().build("test", &table).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.records()[0].wait.is_none());
    }

    #[test]
    fn test_build_schema_mismatch() {
        let table = Table::from_grid(vec![vec![Cell::text("Agente"), Cell::text("Quando")]]).unwrap();
        let err = Ingestor::default().build("test", &table).unwrap_err();
        assert!(err.is_schema_mismatch());
    }

    #[tokio::test]
    async fn test_ingest_from_source() {
        let source = InMemoryTable::new(
            "upload",
            export(vec![row("Naura", "2025-07-22 09:15:00", "0:00:30")]),
        );
        let set = Ingestor::default().ingest(&source).await.unwrap();
        assert_eq!(set.source(), "upload");
        assert_eq!(set.len(), 1);
    }

    #[tokio::test]
    async fn test_ingest_propagates_source_errors() {
        let source = crate::source::WorkbookFile::new("/nonexistent.xlsx");
        let err = Ingestor::default().ingest(&source).await.unwrap_err();
        assert!(matches!(err, IngestError::Io(_)));
    }

    #[tokio::test]
    async fn test_ingest_native_workbook() {
        use rust_xlsxwriter::{Format, Workbook};

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.xlsx");

        let when = Format::new().set_num_format("dd/mm/yyyy hh:mm");
        let elapsed = Format::new().set_num_format("[h]:mm:ss");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Canal").unwrap();
        sheet.write_string(0, 1, "Responsável da conversa").unwrap();
        sheet.write_string(0, 2, "Data e hora de entrada").unwrap();
        sheet.write_string(0, 3, "Tempo de espera após atribuição").unwrap();
        let rows = [
            ("Naura", 45860.375, Some(3.0)),
            ("Diessy", 45860.5625, Some(90.0)),
            ("Naura", 45861.40625, None),
        ];
        for (i, (agent, serial, wait)) in rows.iter().enumerate() {
            let r = i as u32 + 1;
            sheet.write_string(r, 0, "WhatsApp").unwrap();
            sheet.write_string(r, 1, *agent).unwrap();
            sheet.write_number_with_format(r, 2, *serial, &when).unwrap();
            match wait {
                Some(minutes) => sheet.write_number_with_format(r, 3, minutes / 1440.0, &elapsed).unwrap(),
                None => sheet.write_string(r, 3, "-").unwrap(),
            };
        }
        workbook.save(&path).unwrap();

        let set = Ingestor::default()
            .ingest(&crate::source::WorkbookFile::new(&path))
            .await
            .unwrap();

        assert_eq!(set.len(), 3);
        assert_eq!(set.stats().invalid_timestamp, 0);
        let at = |s: &str| chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
        assert_eq!(set.records()[0].timestamp, at("2025-07-22 09:00"));
        assert_eq!(set.records()[1].agent, AgentId::new("Diessy"));
        assert_eq!(set.records()[1].timestamp, at("2025-07-22 13:30"));
        assert_eq!(set.records()[2].timestamp, at("2025-07-23 09:45"));

        let waits: Vec<_> = set.records().iter().map(|r| r.wait.map(|w| w.minutes().round())).collect();
        assert_eq!(waits, vec![Some(3.0), Some(90.0), None]);
    }
}
