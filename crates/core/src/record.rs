//! Interaction records and the record set of one upload.

use crate::agent::AgentId;
use crate::filter::DayFilter;
use crate::id::DatasetId;
use crate::wait::WaitTime;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One logged support event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    /// Agent responsible for the conversation
    pub agent: AgentId,

    /// When the conversation entered the queue
    pub timestamp: NaiveDateTime,

    /// Wait after assignment, when the export recorded one
    pub wait: Option<WaitTime>,
}

impl InteractionRecord {
    /// Create a record without a wait time.
    pub fn new(agent: impl Into<AgentId>, timestamp: NaiveDateTime) -> Self {
        Self {
            agent: agent.into(),
            timestamp,
            wait: None,
        }
    }

    /// Attach a wait time.
    pub fn with_wait(mut self, wait: Option<WaitTime>) -> Self {
        self.wait = wait;
        self
    }

    /// Calendar date of the record.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// Counters collected while turning spreadsheet rows into records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestStats {
    /// Data rows read from the sheet
    pub rows_read: usize,
    /// Rows whose responsible column matched no roster agent
    pub unmatched_agent: usize,
    /// Rows whose timestamp was missing or unparseable
    pub invalid_timestamp: usize,
}

impl IngestStats {
    /// Rows that did not become records.
    pub fn dropped(&self) -> usize {
        self.unmatched_agent + self.invalid_timestamp
    }
}

/// Immutable set of records produced by one upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSet {
    id: DatasetId,
    source: String,
    records: Vec<InteractionRecord>,
    stats: IngestStats,
}

impl RecordSet {
    /// Create a record set.
    pub fn new(source: impl Into<String>, records: Vec<InteractionRecord>, stats: IngestStats) -> Self {
        Self {
            id: DatasetId::new(),
            source: source.into(),
            records,
            stats,
        }
    }

    /// Record set built in memory, with stats matching the records.
    pub fn from_records(records: Vec<InteractionRecord>) -> Self {
        let stats = IngestStats {
            rows_read: records.len(),
            ..Default::default()
        };
        Self::new("memory", records, stats)
    }

    /// Dataset id.
    pub fn id(&self) -> DatasetId {
        self.id
    }

    /// Where the records came from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// All records, in sheet order.
    pub fn records(&self) -> &[InteractionRecord] {
        &self.records
    }

    /// Ingestion counters.
    pub fn stats(&self) -> IngestStats {
        self.stats
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the set holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records passing a day filter.
    pub fn filtered<'a>(&'a self, filter: &'a DayFilter) -> impl Iterator<Item = &'a InteractionRecord> + 'a {
        self.records.iter().filter(move |r| filter.matches(&r.timestamp))
    }

    /// Distinct dates present, ascending.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.records
            .iter()
            .map(InteractionRecord::date)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
