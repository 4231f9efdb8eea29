//! Thresholds for the insight rules.

use serde::{Deserialize, Serialize};

/// Thresholds the insight rules compare against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    /// Volume gap between the pair, in percent of the larger total, above
    /// which the workload counts as imbalanced
    pub imbalance_pct: f64,
    /// Difference of average waits, in minutes, above which response times
    /// count as diverging
    pub wait_gap_minutes: f64,
    /// Share of an agent's volume in its peak hour, in percent, above which
    /// the hour counts as a load peak
    pub peak_load_pct: f64,
    /// Minimum volume before peak-load is judged
    pub peak_min_volume: usize,
    /// Average wait target, in minutes
    pub wait_target_minutes: f64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            imbalance_pct: 20.0,
            wait_gap_minutes: 30.0,
            peak_load_pct: 30.0,
            peak_min_volume: 5,
            wait_target_minutes: 30.0,
        }
    }
}
