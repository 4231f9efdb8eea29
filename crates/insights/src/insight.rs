//! Insight and recommendation types.

use deskpulse_core::AgentId;
use serde::{Deserialize, Serialize};

/// How an insight should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Things look healthy
    Ok,
    /// Needs attention
    Warning,
}

/// Which rule produced an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Volume gap above the imbalance threshold
    Imbalance,
    /// Volume gap within the threshold
    Balanced,
    /// Average waits diverge
    ResponseGap,
    /// Average waits are close
    ResponseSimilar,
    /// One hour holds a large share of an agent's volume
    PeakLoad,
    /// An agent's average wait is above target
    SlowResponse,
}

/// One observation derived from a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    /// Producing rule
    pub kind: InsightKind,
    /// Reading
    pub severity: Severity,
    /// Agent the insight is about, for per-agent rules
    pub agent: Option<AgentId>,
    /// Text shown to the user
    pub message: String,
}

impl std::fmt::Display for Insight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Kind of suggested action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    /// Rebalance incoming conversations
    Redistribute,
    /// Coach the slower agent
    Training,
    /// Keep watching the metrics
    Monitoring,
    /// Standing targets
    Target,
}

/// A suggested action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Kind
    pub kind: RecommendationKind,
    /// Text shown to the user
    pub message: String,
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
