//! Hour-of-day histogram.

use serde::{Deserialize, Serialize};

/// Number of hour buckets in a day.
pub const HOURS: usize = 24;

/// The busiest hour of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeakHour {
    /// Hour of day, 0-23
    pub hour: u32,
    /// Interactions in that hour
    pub count: u32,
}

/// Interactions per hour of day, buckets 0-23.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HourHistogram([u32; HOURS]);

impl HourHistogram {
    /// Empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one interaction at `hour`. Hours past 23 are ignored.
    pub fn record(&mut self, hour: u32) {
        if let Some(bucket) = self.0.get_mut(hour as usize) {
            *bucket += 1;
        }
    }

    /// Count at `hour` (0 for hours past 23).
    pub fn count(&self, hour: u32) -> u32 {
        self.0.get(hour as usize).copied().unwrap_or(0)
    }

    /// All buckets.
    pub fn counts(&self) -> &[u32; HOURS] {
        &self.0
    }

    /// Sum of all buckets.
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    /// Bucket with the highest count; ties go to the earliest hour.
    ///
    /// `None` when the histogram is empty.
    pub fn peak(&self) -> Option<PeakHour> {
        let mut best: Option<PeakHour> = None;
        for (hour, &count) in self.0.iter().enumerate() {
            if count == 0 {
                continue;
            }
            if best.map_or(true, |b| count > b.count) {
                best = Some(PeakHour {
                    hour: hour as u32,
                    count,
                });
            }
        }
        best
    }

    /// Fraction of the total held by `hour`, in percent.
    pub fn share_pct(&self, hour: u32) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        f64::from(self.count(hour)) / f64::from(total) * 100.0
    }
}
