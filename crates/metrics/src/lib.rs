//! Metrics engine for deskpulse.
//!
//! Per-agent counts, hour-of-day distributions, peak hours, daily series and
//! the comparison between the two compared agents.

#![warn(missing_docs)]

mod accumulator;
mod compare;
mod daily;
mod engine;

pub use compare::{compare_response, compare_volume};
pub use daily::day_over_day;
pub use engine::MetricsEngine;
