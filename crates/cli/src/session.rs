//! Interactive session: uploads and filter changes over a line prompt.

use deskpulse_core::{DayFilter, ParseDayFilterError, RecordSet};
use deskpulse_ingest::{discover_workbook, IngestError, Ingestor, TableSource, WorkbookFile};
use deskpulse_insights::InsightGenerator;
use deskpulse_metrics::MetricsEngine;
use deskpulse_report::{render_json, Dashboard, TextReport};
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

const HELP: &str = "\
Commands:
  load [FILE]   load a spreadsheet (largest .xlsx in the current directory if omitted)
  day DATE      show one day only (YYYY-MM-DD or DD/MM/YYYY)
  all           show all data
  show          print the dashboard again
  json          print the dashboard as JSON
  help          this text
  quit          leave the session";

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Upload a file
    Load(Option<PathBuf>),
    /// Change the day filter
    Filter(DayFilter),
    /// Print the current dashboard
    Show,
    /// Print the current dashboard as JSON
    Json,
    /// Print the command list
    Help,
    /// End the session
    Quit,
}

/// Errors in a command line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// Unknown verb
    #[error("unknown command '{0}', type 'help' for the list")]
    Unknown(String),
    /// `day` without a date
    #[error("'day' needs a date")]
    MissingDate,
    /// Unparseable date
    #[error(transparent)]
    Filter(#[from] ParseDayFilterError),
}

impl std::str::FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(v, r)| (v, r.trim()));

        match verb.to_lowercase().as_str() {
            "load" | "upload" | "open" => Ok(Command::Load((!rest.is_empty()).then(|| PathBuf::from(rest)))),
            "day" if rest.is_empty() => Err(CommandError::MissingDate),
            "day" => Ok(Command::Filter(rest.parse()?)),
            "all" => Ok(Command::Filter(DayFilter::All)),
            "show" => Ok(Command::Show),
            "json" => Ok(Command::Json),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// What the caller should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print this and keep going
    Continue(String),
    /// End the session
    Quit,
}

/// Session state: the current upload and the active filter.
///
/// Each upload replaces the held record set and each filter change
/// recomputes the dashboard once; nothing else is cached.
pub struct Session {
    ingestor: Ingestor,
    engine: MetricsEngine,
    generator: InsightGenerator,
    chart_width: usize,
    filter: DayFilter,
    current: Option<Loaded>,
}

struct Loaded {
    records: RecordSet,
    dashboard: Dashboard,
}

impl Session {
    /// Create an empty session.
    pub fn new(ingestor: Ingestor, engine: MetricsEngine, generator: InsightGenerator) -> Self {
        Self {
            ingestor,
            engine,
            generator,
            chart_width: deskpulse_report::DEFAULT_CHART_WIDTH,
            filter: DayFilter::All,
            current: None,
        }
    }

    /// Set the chart width.
    pub fn with_chart_width(mut self, width: usize) -> Self {
        self.chart_width = width;
        self
    }

    /// Set the initial filter.
    pub fn with_filter(mut self, filter: DayFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Active filter.
    pub fn filter(&self) -> DayFilter {
        self.filter
    }

    /// Dashboard of the current upload, if any.
    pub fn dashboard(&self) -> Option<&Dashboard> {
        self.current.as_ref().map(|l| &l.dashboard)
    }

    /// Upload from `source`, replacing the current record set on success.
    ///
    /// A failed upload leaves the previous one in place.
    pub async fn load<S: TableSource + ?Sized>(&mut self, source: &S) -> Result<&Dashboard, IngestError> {
        let records = self.ingestor.ingest(source).await?;
        if let Some(previous) = &self.current {
            debug!("Discarding dataset {}", previous.records.id());
        }
        let dashboard = self.compute(&records);
        let loaded = self.current.insert(Loaded { records, dashboard });
        Ok(&loaded.dashboard)
    }

    /// Change the filter and recompute.
    pub fn set_filter(&mut self, filter: DayFilter) -> Option<&Dashboard> {
        self.filter = filter;
        let records = &self.current.as_ref()?.records;
        let dashboard = self.compute(records);
        let loaded = self.current.as_mut()?;
        loaded.dashboard = dashboard;
        Some(&loaded.dashboard)
    }

    fn compute(&self, records: &RecordSet) -> Dashboard {
        Dashboard::build(records, self.filter, &self.engine, &self.generator)
    }

    fn render(&self, dashboard: &Dashboard) -> String {
        TextReport::new(dashboard).with_width(self.chart_width).to_string()
    }

    /// Execute one command line.
    pub async fn handle(&mut self, line: &str) -> Outcome {
        if line.trim().is_empty() {
            return Outcome::Continue(String::new());
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => return Outcome::Continue(format!("error: {err}")),
        };

        let text = match command {
            Command::Quit => return Outcome::Quit,
            Command::Help => HELP.to_string(),
            Command::Load(path) => self.load_path(path).await,
            Command::Filter(filter) => match self.set_filter(filter).cloned() {
                Some(dashboard) => self.render(&dashboard),
                None => format!("Filter set to {filter}. Load a file to see the dashboard."),
            },
            Command::Show => match self.dashboard() {
                Some(dashboard) => self.render(dashboard),
                None => "No file loaded yet.".to_string(),
            },
            Command::Json => match self.dashboard().map(render_json) {
                Some(Ok(json)) => json,
                Some(Err(err)) => format!("error: {err}"),
                None => "No file loaded yet.".to_string(),
            },
        };
        Outcome::Continue(text)
    }

    async fn load_path(&mut self, path: Option<PathBuf>) -> String {
        let path = match path {
            Some(path) => path,
            None => match discover_workbook(".").await {
                Ok(path) => path,
                Err(err) => return format!("ingestion failed: {err}"),
            },
        };

        let loaded = self.load(&WorkbookFile::new(&path)).await.cloned();
        match loaded {
            Ok(dashboard) => self.render(&dashboard),
            Err(err @ IngestError::SchemaMismatch { .. }) => {
                warn!("Schema mismatch in {}: {}", path.display(), err);
                format!("ingestion failed: {err}")
            }
            Err(err) => {
                warn!("Could not load {}: {}", path.display(), err);
                format!("ingestion failed: {err}")
            }
        }
    }

    /// Read commands from `input` until `quit` or end of input.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("Session started");
        let mut lines = input.lines();
        loop {
            output.write_all(b"> ").await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            match self.handle(&line).await {
                Outcome::Quit => break,
                Outcome::Continue(text) if text.is_empty() => {}
                Outcome::Continue(text) => {
                    output.write_all(text.as_bytes()).await?;
                    if !text.ends_with('\n') {
                        output.write_all(b"\n").await?;
                    }
                }
            }
        }
        output.flush().await?;
        info!("Session ended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskpulse_ingest::{Cell, InMemoryTable, Table};

    fn session() -> Session {
        Session::new(Ingestor::default(), MetricsEngine::default(), InsightGenerator::new())
    }

    fn upload() -> InMemoryTable {
        let header = vec![Cell::text("Responsável da conversa"), Cell::text("Data e hora de entrada")];
        let rows = [
            ("Naura", "22/07/2025 09:00"),
            ("Naura", "22/07/2025 09:15"),
            ("Diessy", "22/07/2025 14:00"),
        ];
        let mut grid = vec![header];
        grid.extend(rows.iter().map(|(a, t)| vec![Cell::text(*a), Cell::text(*t)]));
        InMemoryTable::new("upload.xlsx", Table::from_grid(grid).unwrap())
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("load".parse::<Command>().unwrap(), Command::Load(None));
        assert_eq!(
            "load  my export.xlsx ".parse::<Command>().unwrap(),
            Command::Load(Some(PathBuf::from("my export.xlsx")))
        );
        assert_eq!("ALL".parse::<Command>().unwrap(), Command::Filter(DayFilter::All));
        assert_eq!(
            "day 22/07/2025".parse::<Command>().unwrap(),
            Command::Filter("2025-07-22".parse().unwrap())
        );
        assert_eq!("day".parse::<Command>().unwrap_err(), CommandError::MissingDate);
        assert!(matches!("day tomorrow".parse::<Command>(), Err(CommandError::Filter(_))));
        assert!(matches!("dance".parse::<Command>(), Err(CommandError::Unknown(_))));
    }

    #[tokio::test]
    async fn test_filter_recomputes_current_upload() {
        let mut session = session();
        let dashboard = session.load(&upload()).await.unwrap();
        assert_eq!(dashboard.snapshot.overall.total, 3);

        let dashboard = session.set_filter("2025-07-23".parse().unwrap()).unwrap();
        assert!(dashboard.is_empty());
        assert!(dashboard.insights.is_empty());

        let dashboard = session.set_filter(DayFilter::All).unwrap();
        assert_eq!(dashboard.snapshot.agent_named("Naura").unwrap().total, 2);
    }

    #[tokio::test]
    async fn test_failed_upload_keeps_session_usable() {
        let mut session = session();
        session.load(&upload()).await.unwrap();
        let dataset = session.dashboard().unwrap().dataset;

        match session.handle("load /nonexistent/export.xlsx").await {
            Outcome::Continue(text) => assert!(text.starts_with("ingestion failed")),
            Outcome::Quit => panic!("session ended"),
        }
        assert_eq!(session.dashboard().unwrap().dataset, dataset);

        let bad = InMemoryTable::new("bad.xlsx", Table::from_grid(vec![vec![Cell::text("Canal")]]).unwrap());
        assert!(session.load(&bad).await.unwrap_err().is_schema_mismatch());
        assert_eq!(session.dashboard().unwrap().dataset, dataset);
    }

    #[tokio::test]
    async fn test_new_upload_replaces_dataset() {
        let mut session = session();
        let first = session.load(&upload()).await.unwrap().dataset;
        let second = session.load(&upload()).await.unwrap().dataset;
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_filter_before_upload() {
        let mut session = session();
        match session.handle("day 2025-07-22").await {
            Outcome::Continue(text) => assert!(text.contains("Load a file")),
            Outcome::Quit => panic!("session ended"),
        }
        session.load(&upload()).await.unwrap();
        assert_eq!(session.dashboard().unwrap().snapshot.filter, session.filter());
    }

    #[tokio::test]
    async fn test_run_loop() {
        let mut session = session();
        session.load(&upload()).await.unwrap();

        let input = std::io::Cursor::new(b"show\nday 2025-07-23\nbogus\nquit\nshow\n".to_vec());
        let mut output = Vec::new();
        session.run(input, &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("== Key metrics =="));
        assert!(text.contains("No interactions on 2025-07-23."));
        assert!(text.contains("error: unknown command 'bogus'"));
        // nothing after quit
        assert_eq!(text.matches("== Key metrics ==").count(), 1);
    }
}
