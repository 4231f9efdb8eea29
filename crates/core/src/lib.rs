//! deskpulse core data models.
//!
//! This crate defines the records, filters and snapshot types shared by
//! ingestion, the metrics engine, insights and rendering.

#![warn(missing_docs)]

// Core identities
mod id;
mod agent;

// Records
mod record;
mod filter;
mod wait;

// Aggregates
mod histogram;
mod snapshot;

// Re-exports
pub use id::*;
pub use agent::{AgentId, AgentRoster};

pub use record::{InteractionRecord, IngestStats, RecordSet};
pub use filter::{DayFilter, ParseDayFilterError};
pub use wait::{WaitBand, WaitTime};

pub use histogram::{HourHistogram, PeakHour, HOURS};
pub use snapshot::{
    MetricsSnapshot, OverallMetrics, AgentMetrics, BandCount,
    Comparison, VolumeDelta, ResponseComparison,
    DailyVolume, AgentCount, DayOverDay,
};
