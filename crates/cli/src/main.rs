//! deskpulse - attendance dashboard for help-desk exports.

mod config;
mod session;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use config::DashboardConfig;
use deskpulse_core::DayFilter;
use deskpulse_ingest::{discover_workbook, Ingestor, WorkbookFile};
use deskpulse_insights::InsightGenerator;
use deskpulse_metrics::MetricsEngine;
use deskpulse_report::{render_json, Dashboard, TextReport};
use session::Session;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "deskpulse")]
#[command(about = "Per-agent attendance dashboard from a help-desk spreadsheet export", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file (agents, column names, insight thresholds)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the dashboard for one export
    Report {
        /// Spreadsheet to read (largest .xlsx in the current directory if omitted)
        file: Option<PathBuf>,
        /// Restrict to one day (YYYY-MM-DD, DD/MM/YYYY or "all")
        #[arg(long, default_value = "all")]
        day: DayFilter,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// Length of the longest chart bar
        #[arg(long)]
        width: Option<usize>,
    },
    /// Interactive session: load files and change the day filter
    Session {
        /// Spreadsheet to load at start
        file: Option<PathBuf>,
        /// Initial day filter
        #[arg(long, default_value = "all")]
        day: DayFilter,
    },
    /// Show which spreadsheet would be picked in a directory
    Discover {
        /// Directory to search
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // stdout carries the dashboard
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn resolve_file(file: Option<PathBuf>) -> Result<PathBuf> {
    match file {
        Some(file) => Ok(file),
        None => discover_workbook(".")
            .await
            .context("no file given and none found in the current directory"),
    }
}

fn pipeline(config: &DashboardConfig) -> (Ingestor, MetricsEngine, InsightGenerator) {
    (
        Ingestor::new(config.agents.clone(), config.columns.clone()),
        MetricsEngine::new(config.agents.clone()),
        InsightGenerator::new().with_config(config.insights.clone()),
    )
}

async fn report(
    config: &DashboardConfig,
    file: &Path,
    day: DayFilter,
    format: Format,
    width: usize,
) -> Result<()> {
    let (ingestor, engine, generator) = pipeline(config);
    let records = ingestor
        .ingest(&WorkbookFile::new(file))
        .await
        .with_context(|| format!("ingestion failed for {}", file.display()))?;
    info!("Loaded {} interaction(s) from {}", records.len(), file.display());

    let dashboard = Dashboard::build(&records, day, &engine, &generator);
    match format {
        Format::Text => print!("{}", TextReport::new(&dashboard).with_width(width)),
        Format::Json => println!("{}", render_json(&dashboard)?),
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = DashboardConfig::load(cli.config.as_deref()).await?;

    match cli.command {
        Commands::Report { file, day, format, width } => {
            let file = resolve_file(file).await?;
            report(&config, &file, day, format, width.unwrap_or(config.chart_width)).await?;
        }
        Commands::Session { file, day } => {
            let (ingestor, engine, generator) = pipeline(&config);
            let mut session = Session::new(ingestor, engine, generator)
                .with_chart_width(config.chart_width)
                .with_filter(day);

            if let Some(file) = file {
                let dashboard = session
                    .load(&WorkbookFile::new(&file))
                    .await
                    .with_context(|| format!("ingestion failed for {}", file.display()))?;
                print!("{}", TextReport::new(dashboard).with_width(config.chart_width));
            }

            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            session.run(stdin, tokio::io::stdout()).await?;
        }
        Commands::Discover { dir } => {
            let path = discover_workbook(&dir)
                .await
                .with_context(|| format!("searching {}", dir.display()))?;
            println!("{}", path.display());
        }
    }

    Ok(())
}
