//! Agents and the roster of tracked agents.

use serde::{Deserialize, Serialize};

/// Identifier for a support agent, by display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(String);

impl AgentId {
    /// Create a new agent ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Display name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AgentId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Ordered set of agents whose interactions are tracked.
///
/// Order matters: the first two agents form the compared pair, and when a raw
/// name matches several agents the earliest one wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentRoster {
    agents: Vec<AgentId>,
}

impl AgentRoster {
    /// Create a roster from agent names, dropping blanks and duplicates.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut agents: Vec<AgentId> = Vec::new();
        for name in names {
            let name: String = name.into();
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            let agent = AgentId::new(name);
            if !agents.contains(&agent) {
                agents.push(agent);
            }
        }
        Self { agents }
    }

    /// Agents in roster order.
    pub fn agents(&self) -> &[AgentId] {
        &self.agents
    }

    /// Number of agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether the roster has no agents.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Position of an agent in the roster.
    pub fn position(&self, agent: &AgentId) -> Option<usize> {
        self.agents.iter().position(|a| a == agent)
    }

    /// The two agents compared against each other, if the roster has them.
    pub fn pair(&self) -> Option<(&AgentId, &AgentId)> {
        match self.agents.as_slice() {
            [a, b, ..] => Some((a, b)),
            _ => None,
        }
    }

    /// Map a raw "responsible" cell to a roster agent.
    ///
    /// Matching is a case-insensitive substring test, so exports that carry
    /// full names ("Naura Silva") or team suffixes still resolve.
    pub fn resolve(&self, raw: &str) -> Option<&AgentId> {
        let haystack = raw.to_lowercase();
        self.agents
            .iter()
            .find(|agent| haystack.contains(&agent.as_str().to_lowercase()))
    }
}

impl Default for AgentRoster {
    fn default() -> Self {
        Self::new(["Naura", "Diessy"])
    }
}
