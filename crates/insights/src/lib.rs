//! Insight generator for deskpulse.
//!
//! Turns a metrics snapshot into short observations and suggested actions
//! using ordered threshold rules.

#![warn(missing_docs)]

mod config;
mod insight;
mod generator;

pub use config::InsightConfig;
pub use insight::{Insight, InsightKind, Severity, Recommendation, RecommendationKind};
pub use generator::InsightGenerator;
