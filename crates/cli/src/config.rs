//! Dashboard configuration, read from an optional JSON file.

use deskpulse_core::AgentRoster;
use deskpulse_ingest::ColumnMapping;
use deskpulse_insights::InsightConfig;
use deskpulse_report::DEFAULT_CHART_WIDTH;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("cannot read config {}: {source}", .path.display())]
    Io {
        /// Config file
        path: PathBuf,
        /// Cause
        source: std::io::Error,
    },

    /// The file is not valid configuration JSON
    #[error("invalid config {}: {source}", .path.display())]
    Json {
        /// Config file
        path: PathBuf,
        /// Cause
        source: serde_json::Error,
    },

    /// No agents to track
    #[error("config lists no agents")]
    EmptyRoster,
}

/// Everything a run can be configured with.
///
/// Every field is optional in the file; missing ones keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Agents to track, in comparison order
    pub agents: AgentRoster,
    /// Header names of the export
    pub columns: ColumnMapping,
    /// Insight thresholds
    pub insights: InsightConfig,
    /// Length of the longest chart bar
    pub chart_width: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            agents: AgentRoster::default(),
            columns: ColumnMapping::default(),
            insights: InsightConfig::default(),
            chart_width: DEFAULT_CHART_WIDTH,
        }
    }
}

impl DashboardConfig {
    /// Load the file at `path`, or the defaults when there is none.
    pub async fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_json(&text).map_err(|err| match err {
            ConfigError::Json { source, .. } => ConfigError::Json {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Parse and validate configuration JSON.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let raw: Self = serde_json::from_str(text).map_err(|source| ConfigError::Json {
            path: PathBuf::new(),
            source,
        })?;

        // Normalize through the constructor so blanks and duplicates go away.
        let agents = AgentRoster::new(raw.agents.agents().iter().map(|a| a.as_str().to_string()));
        if agents.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }

        Ok(Self { agents, ..raw })
    }
}
