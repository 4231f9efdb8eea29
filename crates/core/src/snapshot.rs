//! Metrics snapshot - the derived, read-only aggregate of a record set.

use crate::agent::AgentId;
use crate::filter::DayFilter;
use crate::histogram::{HourHistogram, PeakHour};
use crate::wait::WaitBand;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Aggregates of a (possibly filtered) record set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Filter the snapshot was computed under
    pub filter: DayFilter,

    /// Totals across all tracked agents
    pub overall: OverallMetrics,

    /// Per-agent metrics, in roster order, then agents outside the roster
    pub agents: Vec<AgentMetrics>,

    /// How many leading entries of `agents` are roster agents
    pub roster_size: usize,

    /// Volume comparison of the compared pair
    pub comparison: Comparison,

    /// Response-time comparison of the compared pair
    pub response: ResponseComparison,

    /// Volume per date, ascending
    pub daily: Vec<DailyVolume>,

    /// Change between the last two dates, per agent
    pub day_over_day: Vec<DayOverDay>,
}

impl MetricsSnapshot {
    /// Metrics of one agent.
    pub fn agent(&self, agent: &AgentId) -> Option<&AgentMetrics> {
        self.agents.iter().find(|m| &m.agent == agent)
    }

    /// Metrics of an agent by display name.
    pub fn agent_named(&self, name: &str) -> Option<&AgentMetrics> {
        self.agents.iter().find(|m| m.agent.as_str() == name)
    }

    /// Metrics of the roster agents, in roster order.
    pub fn roster_agents(&self) -> &[AgentMetrics] {
        &self.agents[..self.roster_size.min(self.agents.len())]
    }

    /// Whether no record passed the filter.
    pub fn is_empty(&self) -> bool {
        self.overall.total == 0
    }
}

/// Totals across all tracked agents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OverallMetrics {
    /// Records in range
    pub total: usize,
    /// Distinct dates in range
    pub days: usize,
    /// Records per active day
    pub daily_average: f64,
}

/// Metrics for one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentMetrics {
    /// The agent
    pub agent: AgentId,

    /// Interactions in range
    pub total: usize,

    /// Distinct dates with at least one interaction
    pub active_days: usize,

    /// Interactions per active day
    pub daily_average: f64,

    /// Mean wait in minutes over records that have one (0 when none)
    pub average_wait: f64,

    /// Records carrying a wait time
    pub waits_recorded: usize,

    /// Interactions per hour of day
    pub hourly: HourHistogram,

    /// Busiest hour
    pub peak_hour: Option<PeakHour>,

    /// Wait band distribution, in band order, zero bands omitted
    pub wait_bands: Vec<BandCount>,
}

impl AgentMetrics {
    /// Zeroed metrics for an agent with no records in range.
    pub fn empty(agent: AgentId) -> Self {
        Self {
            agent,
            total: 0,
            active_days: 0,
            daily_average: 0.0,
            average_wait: 0.0,
            waits_recorded: 0,
            hourly: HourHistogram::new(),
            peak_hour: None,
            wait_bands: Vec::new(),
        }
    }
}

/// Count of records in one wait band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandCount {
    /// Band
    pub band: WaitBand,
    /// Records in the band
    pub count: usize,
}

/// Volume comparison between the two compared agents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Comparison {
    /// One side has no records in range, or there is no pair to compare
    NoData,
    /// Both sides have records
    Delta(VolumeDelta),
}

impl Comparison {
    /// The delta, when there is data.
    pub fn delta(&self) -> Option<&VolumeDelta> {
        match self {
            Comparison::NoData => None,
            Comparison::Delta(delta) => Some(delta),
        }
    }
}

/// Difference between two agents' totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeDelta {
    /// First agent of the pair
    pub first: AgentId,
    /// Second agent of the pair
    pub second: AgentId,
    /// First agent's total
    pub first_total: usize,
    /// Second agent's total
    pub second_total: usize,
    /// `first_total - second_total`
    pub difference: i64,
    /// `|difference| / max(totals) * 100`
    pub percent: f64,
    /// Agent with the larger total; `None` on a tie
    pub leader: Option<AgentId>,
}

impl VolumeDelta {
    /// Absolute difference of the totals.
    pub fn gap(&self) -> u64 {
        self.difference.unsigned_abs()
    }

    /// Agent with the smaller total; `None` on a tie.
    pub fn trailer(&self) -> Option<&AgentId> {
        let leader = self.leader.as_ref()?;
        Some(if leader == &self.first {
            &self.second
        } else {
            &self.first
        })
    }
}

/// Which of the pair responds faster, by average wait.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResponseComparison {
    /// No pair, or neither side has records
    NoData,
    /// Same average wait, or no wait data on either side
    Tie,
    /// One agent has the lower average wait
    Faster {
        /// Agent with the lower average
        faster: AgentId,
        /// The other agent
        slower: AgentId,
        /// Absolute difference of the averages, in minutes
        gap_minutes: f64,
    },
}

/// Records per agent on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyVolume {
    /// Date
    pub date: NaiveDate,
    /// Count per roster agent, in roster order
    pub counts: Vec<AgentCount>,
}

impl DailyVolume {
    /// Records on the date across agents.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|c| c.count).sum()
    }

    /// Count for one agent.
    pub fn count_for(&self, agent: &AgentId) -> usize {
        self.counts
            .iter()
            .find(|c| &c.agent == agent)
            .map_or(0, |c| c.count)
    }
}

/// Count attributed to an agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentCount {
    /// Agent
    pub agent: AgentId,
    /// Count
    pub count: usize,
}

/// Volume change of an agent between the last two dates in range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayOverDay {
    /// Agent
    pub agent: AgentId,
    /// Earlier date
    pub previous_date: NaiveDate,
    /// Later date
    pub current_date: NaiveDate,
    /// Count on the earlier date
    pub previous: usize,
    /// Count on the later date
    pub current: usize,
    /// `current - previous`
    pub change: i64,
}
