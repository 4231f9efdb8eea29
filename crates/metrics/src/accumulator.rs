//! Per-agent running totals.

use chrono::{NaiveDate, Timelike};
use deskpulse_core::{AgentId, AgentMetrics, BandCount, HourHistogram, InteractionRecord, WaitBand};
use std::collections::{BTreeMap, BTreeSet};

/// Collects one agent's records into [`AgentMetrics`].
#[derive(Debug)]
pub(crate) struct AgentAccumulator {
    agent: AgentId,
    total: usize,
    dates: BTreeSet<NaiveDate>,
    hourly: HourHistogram,
    wait_sum: f64,
    waits: usize,
    bands: BTreeMap<WaitBand, usize>,
}

impl AgentAccumulator {
    pub(crate) fn new(agent: AgentId) -> Self {
        Self {
            agent,
            total: 0,
            dates: BTreeSet::new(),
            hourly: HourHistogram::new(),
            wait_sum: 0.0,
            waits: 0,
            bands: BTreeMap::new(),
        }
    }

    pub(crate) fn add(&mut self, record: &InteractionRecord) {
        self.total += 1;
        self.dates.insert(record.date());
        self.hourly.record(record.timestamp.hour());

        if let Some(wait) = record.wait {
            self.wait_sum += wait.minutes();
            self.waits += 1;
        }
        *self.bands.entry(WaitBand::classify(record.wait)).or_insert(0) += 1;
    }

    pub(crate) fn finish(self) -> AgentMetrics {
        if self.total == 0 {
            return AgentMetrics::empty(self.agent);
        }

        let active_days = self.dates.len();
        AgentMetrics {
            agent: self.agent,
            total: self.total,
            active_days,
            daily_average: self.total as f64 / active_days as f64,
            average_wait: if self.waits > 0 {
                self.wait_sum / self.waits as f64
            } else {
                0.0
            },
            waits_recorded: self.waits,
            peak_hour: self.hourly.peak(),
            hourly: self.hourly,
            // BTreeMap iterates in band order
            wait_bands: self
                .bands
                .into_iter()
                .map(|(band, count)| BandCount { band, count })
                .collect(),
        }
    }
}
