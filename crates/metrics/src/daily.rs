//! Per-date volume series and day-over-day change.

use chrono::NaiveDate;
use deskpulse_core::{AgentCount, AgentId, DailyVolume, DayOverDay};
use std::collections::BTreeMap;

/// Counts per date, indexed by agent position.
#[derive(Debug, Default)]
pub(crate) struct DailySeries {
    by_date: BTreeMap<NaiveDate, Vec<usize>>,
}

impl DailySeries {
    pub(crate) fn add(&mut self, date: NaiveDate, agent_index: usize) {
        let counts = self.by_date.entry(date).or_default();
        if counts.len() <= agent_index {
            counts.resize(agent_index + 1, 0);
        }
        counts[agent_index] += 1;
    }

    /// Distinct dates seen.
    pub(crate) fn days(&self) -> usize {
        self.by_date.len()
    }

    /// Materialize the series for `agents`, ascending by date.
    pub(crate) fn volumes(&self, agents: &[AgentId]) -> Vec<DailyVolume> {
        self.by_date
            .iter()
            .map(|(date, counts)| DailyVolume {
                date: *date,
                counts: agents
                    .iter()
                    .enumerate()
                    .map(|(i, agent)| AgentCount {
                        agent: agent.clone(),
                        count: counts.get(i).copied().unwrap_or(0),
                    })
                    .collect(),
            })
            .collect()
    }
}

/// Change per agent between the last two dates of a series.
///
/// Empty when the series covers fewer than two dates.
pub fn day_over_day(series: &[DailyVolume]) -> Vec<DayOverDay> {
    let [.., previous, current] = series else {
        return Vec::new();
    };

    current
        .counts
        .iter()
        .map(|c| {
            let before = previous.count_for(&c.agent);
            DayOverDay {
                agent: c.agent.clone(),
                previous_date: previous.date,
                current_date: current.date,
                previous: before,
                current: c.count,
                change: c.count as i64 - before as i64,
            }
        })
        .collect()
}
