//! Metrics engine - computes a snapshot from a record set and a day filter.

use crate::accumulator::AgentAccumulator;
use crate::compare::{compare_response, compare_volume};
use crate::daily::{day_over_day, DailySeries};
use deskpulse_core::{
    AgentId, AgentRoster, Comparison, DayFilter, MetricsSnapshot, OverallMetrics, RecordSet,
    ResponseComparison,
};
use tracing::{debug, info};

/// Computes [`MetricsSnapshot`]s for a roster.
///
/// The engine holds no state besides the roster: a snapshot depends only on
/// the record set and the filter it is given.
#[derive(Debug, Clone, Default)]
pub struct MetricsEngine {
    roster: AgentRoster,
}

impl MetricsEngine {
    /// Create an engine for `roster`.
    pub fn new(roster: AgentRoster) -> Self {
        Self { roster }
    }

    /// Roster the engine reports on.
    pub fn roster(&self) -> &AgentRoster {
        &self.roster
    }

    /// Compute the snapshot of `records` under `filter`.
    ///
    /// Agents appear in roster order. Records of agents outside the roster
    /// still count; those agents are appended in first-seen order. An empty
    /// range yields zero totals, no peak hours and no comparison data.
    pub fn compute(&self, records: &RecordSet, filter: DayFilter) -> MetricsSnapshot {
        let mut agents: Vec<AgentId> = self.roster.agents().to_vec();
        let mut accumulators: Vec<AgentAccumulator> =
            agents.iter().cloned().map(AgentAccumulator::new).collect();
        let mut series = DailySeries::default();
        let mut total = 0usize;

        for record in records.filtered(&filter) {
            let index = match agents.iter().position(|a| a == &record.agent) {
                Some(index) => index,
                None => {
                    debug!("Agent {} is not in the roster, tracking separately", record.agent);
                    agents.push(record.agent.clone());
                    accumulators.push(AgentAccumulator::new(record.agent.clone()));
                    agents.len() - 1
                }
            };
            accumulators[index].add(record);
            series.add(record.date(), index);
            total += 1;
        }

        let days = series.days();
        let overall = OverallMetrics {
            total,
            days,
            daily_average: if days > 0 {
                total as f64 / days as f64
            } else {
                0.0
            },
        };

        let metrics: Vec<_> = accumulators.into_iter().map(AgentAccumulator::finish).collect();

        let (comparison, response) = match metrics.as_slice() {
            [first, second, ..] if self.roster.len() >= 2 => {
                (compare_volume(first, second), compare_response(first, second))
            }
            _ => (Comparison::NoData, ResponseComparison::NoData),
        };

        let daily = series.volumes(&agents);
        let day_over_day = day_over_day(&daily);

        info!(
            "Computed snapshot of dataset {} (filter: {}): {} record(s) over {} day(s)",
            records.id(),
            filter,
            total,
            days
        );

        MetricsSnapshot {
            filter,
            overall,
            agents: metrics,
            roster_size: self.roster.len(),
            comparison,
            response,
            daily,
            day_over_day,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use deskpulse_core::{InteractionRecord, WaitTime, HOURS};
    use proptest::prelude::*;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn sample() -> RecordSet {
        RecordSet::from_records(vec![
            InteractionRecord::new("Naura", at("2025-07-22 09:00")),
            InteractionRecord::new("Naura", at("2025-07-22 09:15")),
            InteractionRecord::new("Diessy", at("2025-07-22 14:00")),
        ])
    }

    #[test]
    fn test_unfiltered_example() {
        let snapshot = MetricsEngine::default().compute(&sample(), DayFilter::All);

        let naura = snapshot.agent_named("Naura").unwrap();
        let diessy = snapshot.agent_named("Diessy").unwrap();
        assert_eq!(naura.total, 2);
        assert_eq!(diessy.total, 1);
        assert_eq!(naura.peak_hour.map(|p| p.hour), Some(9));
        assert_eq!(diessy.peak_hour.map(|p| p.hour), Some(14));

        let delta = snapshot.comparison.delta().unwrap();
        assert_eq!(delta.difference, 1);
        assert_eq!(delta.percent, 50.0);
        assert_eq!(snapshot.overall.total, 3);
        assert_eq!(snapshot.overall.days, 1);
        assert!(snapshot.day_over_day.is_empty());
    }

    #[test]
    fn test_filter_without_matches_is_empty_not_error() {
        let filter = DayFilter::Day(NaiveDate::from_ymd_opt(2025, 7, 23).unwrap());
        let snapshot = MetricsEngine::default().compute(&sample(), filter);

        assert!(snapshot.is_empty());
        assert_eq!(snapshot.agents.len(), 2);
        for agent in &snapshot.agents {
            assert_eq!(agent.total, 0);
            assert!(agent.peak_hour.is_none());
        }
        assert_eq!(snapshot.comparison, Comparison::NoData);
        assert_eq!(snapshot.response, ResponseComparison::NoData);
        assert!(snapshot.daily.is_empty());
        assert_eq!(snapshot.overall.daily_average, 0.0);
    }

    #[test]
    fn test_filter_restricts_all_aggregates() {
        let mut records = sample().records().to_vec();
        records.push(InteractionRecord::new("Diessy", at("2025-07-23 08:00")));
        records.push(InteractionRecord::new("Diessy", at("2025-07-23 08:30")));
        let set = RecordSet::from_records(records);
        let engine = MetricsEngine::default();

        let all = engine.compute(&set, DayFilter::All);
        assert_eq!(all.agent_named("Diessy").unwrap().total, 3);
        assert_eq!(all.agent_named("Diessy").unwrap().peak_hour.map(|p| p.hour), Some(8));
        assert_eq!(all.daily.len(), 2);
        assert_eq!(all.day_over_day.len(), 2);
        assert_eq!(all.day_over_day[1].change, 1);

        let day = engine.compute(&set, "2025-07-23".parse().unwrap());
        assert_eq!(day.overall.total, 2);
        assert_eq!(day.agent_named("Naura").unwrap().total, 0);
        assert_eq!(day.comparison, Comparison::NoData);
        assert!(day.day_over_day.is_empty());
    }

    #[test]
    fn test_unknown_agents_still_counted() {
        let set = RecordSet::from_records(vec![
            InteractionRecord::new("Naura", at("2025-07-22 09:00")),
            InteractionRecord::new("Carlos", at("2025-07-22 10:00")),
        ]);
        let snapshot = MetricsEngine::default().compute(&set, DayFilter::All);
        assert_eq!(snapshot.agents.len(), 3);
        assert_eq!(snapshot.agents[2].agent.as_str(), "Carlos");
        assert_eq!(snapshot.roster_agents().len(), 2);
        assert_eq!(snapshot.daily[0].total(), 2);
        // Diessy has no records, so the pair has no comparison
        assert_eq!(snapshot.comparison, Comparison::NoData);
    }

    #[test]
    fn test_single_agent_roster_has_no_comparison() {
        let engine = MetricsEngine::new(AgentRoster::new(["Naura"]));
        let set = RecordSet::from_records(vec![
            InteractionRecord::new("Naura", at("2025-07-22 09:00")),
            InteractionRecord::new("Diessy", at("2025-07-22 10:00")),
        ]);
        let snapshot = engine.compute(&set, DayFilter::All);
        assert_eq!(snapshot.comparison, Comparison::NoData);
        assert_eq!(snapshot.response, ResponseComparison::NoData);
    }

    #[test]
    fn test_wait_metrics() {
        let wait = |m: f64| WaitTime::from_minutes(m);
        let set = RecordSet::from_records(vec![
            InteractionRecord::new("Naura", at("2025-07-22 09:00")).with_wait(wait(4.0)),
            InteractionRecord::new("Naura", at("2025-07-22 10:00")).with_wait(wait(6.0)),
            InteractionRecord::new("Diessy", at("2025-07-22 11:00")).with_wait(wait(60.0)),
        ]);
        let snapshot = MetricsEngine::default().compute(&set, DayFilter::All);
        assert_eq!(snapshot.agent_named("Naura").unwrap().average_wait, 5.0);
        match &snapshot.response {
            ResponseComparison::Faster { faster, gap_minutes, .. } => {
                assert_eq!(faster.as_str(), "Naura");
                assert_eq!(*gap_minutes, 55.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    fn record_strategy() -> impl Strategy<Value = InteractionRecord> {
        (0..3usize, 20..25u32, 0..24u32, 0..60u32).prop_map(|(agent, day, hour, minute)| {
            let ts = NaiveDate::from_ymd_opt(2025, 7, day)
                .unwrap()
                .and_hms_opt(hour, minute, 0)
                .unwrap();
            InteractionRecord::new(["Naura", "Diessy", "Carlos"][agent], ts)
        })
    }

    fn record_set_strategy() -> impl Strategy<Value = RecordSet> {
        prop::collection::vec(record_strategy(), 0..80).prop_map(RecordSet::from_records)
    }

    proptest! {
        #[test]
        fn test_totals_sum_to_record_count(set in record_set_strategy()) {
            let snapshot = MetricsEngine::default().compute(&set, DayFilter::All);
            let sum: usize = snapshot.agents.iter().map(|a| a.total).sum();
            prop_assert_eq!(sum, set.len());
            prop_assert_eq!(snapshot.overall.total, set.len());
        }

        #[test]
        fn test_filtered_totals_sum_to_matching_records(set in record_set_strategy(), day in 19..26u32) {
            let date = NaiveDate::from_ymd_opt(2025, 7, day).unwrap();
            let snapshot = MetricsEngine::default().compute(&set, DayFilter::Day(date));
            let matching = set.records().iter().filter(|r| r.date() == date).count();
            let sum: usize = snapshot.agents.iter().map(|a| a.total).sum();
            prop_assert_eq!(sum, matching);
            prop_assert_eq!(snapshot.overall.total, matching);
            prop_assert!(snapshot.day_over_day.is_empty());
        }

        #[test]
        fn test_peak_hour_is_a_maximum(set in record_set_strategy()) {
            let snapshot = MetricsEngine::default().compute(&set, DayFilter::All);
            for agent in &snapshot.agents {
                let Some(peak) = agent.peak_hour else {
                    prop_assert_eq!(agent.total, 0);
                    continue;
                };
                prop_assert!((peak.hour as usize) < HOURS);
                prop_assert_eq!(agent.hourly.count(peak.hour), peak.count);
                for hour in 0..HOURS as u32 {
                    prop_assert!(peak.count >= agent.hourly.count(hour));
                    if hour < peak.hour {
                        prop_assert!(agent.hourly.count(hour) < peak.count);
                    }
                }
            }
        }
    }
}
