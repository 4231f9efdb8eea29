//! Column mapping between the export's headers and record fields.

use crate::error::{IngestError, Result};
use serde::{Deserialize, Serialize};

/// Header names of the columns a record is built from.
///
/// Defaults match the Octadesk conversation export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    /// Agent responsible for the conversation
    pub agent: String,
    /// Entry date and time
    pub timestamp: String,
    /// Wait after assignment; optional in the sheet
    pub wait: Option<String>,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            agent: "Responsável da conversa".to_string(),
            timestamp: "Data e hora de entrada".to_string(),
            wait: Some("Tempo de espera após atribuição".to_string()),
        }
    }
}

/// Positions of the mapped columns in a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndices {
    /// Agent column
    pub agent: usize,
    /// Timestamp column
    pub timestamp: usize,
    /// Wait column, when present
    pub wait: Option<usize>,
}

impl ColumnMapping {
    /// Find the mapped columns in `headers`.
    ///
    /// Headers compare trimmed and case-insensitively. The agent and timestamp
    /// columns are required; a missing wait column only means no wait data.
    pub fn locate(&self, headers: &[String]) -> Result<ColumnIndices> {
        let find = |name: &str| {
            let wanted = name.trim().to_lowercase();
            headers.iter().position(|h| h.trim().to_lowercase() == wanted)
        };

        let agent = find(&self.agent);
        let timestamp = find(&self.timestamp);

        match (agent, timestamp) {
            (Some(agent), Some(timestamp)) => Ok(ColumnIndices {
                agent,
                timestamp,
                wait: self.wait.as_deref().and_then(find),
            }),
            _ => {
                let mut missing = Vec::new();
                if agent.is_none() {
                    missing.push(self.agent.clone());
                }
                if timestamp.is_none() {
                    missing.push(self.timestamp.clone());
                }
                Err(IngestError::SchemaMismatch {
                    missing,
                    found: headers.to_vec(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_locate_default_headers() {
        let idx = ColumnMapping::default()
            .locate(&headers(&[
                "Número",
                "DATA E HORA DE ENTRADA",
                " Responsável da conversa ",
                "Tempo de espera após atribuição",
            ]))
            .unwrap();
        assert_eq!(idx, ColumnIndices { agent: 2, timestamp: 1, wait: Some(3) });
    }

    #[test]
    fn test_missing_wait_column_is_not_an_error() {
        let idx = ColumnMapping::default()
            .locate(&headers(&["Responsável da conversa", "Data e hora de entrada"]))
            .unwrap();
        assert!(idx.wait.is_none());
    }

    #[test]
    fn test_missing_required_columns() {
        let err = ColumnMapping::default()
            .locate(&headers(&["Data e hora de entrada", "Canal"]))
            .unwrap_err();
        match err {
            IngestError::SchemaMismatch { missing, found } => {
                assert_eq!(missing, vec!["Responsável da conversa".to_string()]);
                assert_eq!(found.len(), 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
