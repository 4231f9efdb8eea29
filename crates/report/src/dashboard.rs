//! Everything one rendering shows, computed in one pass.

use deskpulse_core::{DatasetId, DayFilter, IngestStats, MetricsSnapshot, RecordSet};
use deskpulse_insights::{Insight, InsightGenerator, Recommendation};
use deskpulse_metrics::MetricsEngine;
use serde::Serialize;
use tracing::debug;

/// A computed dashboard: snapshot plus the text derived from it.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    /// Where the records came from
    pub source: String,
    /// Dataset the snapshot was computed from
    pub dataset: DatasetId,
    /// Ingestion counters of the dataset
    pub ingest: IngestStats,
    /// Metrics
    pub snapshot: MetricsSnapshot,
    /// Insights, in rule order
    pub insights: Vec<Insight>,
    /// Suggested actions
    pub recommendations: Vec<Recommendation>,
}

impl Dashboard {
    /// Compute the dashboard of `records` under `filter`.
    pub fn build(
        records: &RecordSet,
        filter: DayFilter,
        engine: &MetricsEngine,
        generator: &InsightGenerator,
    ) -> Self {
        let snapshot = engine.compute(records, filter);
        let insights = generator.generate(&snapshot);
        let recommendations = generator.recommend(&snapshot, &insights);
        debug!(
            "Dashboard for {}: {} insight(s), {} recommendation(s)",
            records.source(),
            insights.len(),
            recommendations.len()
        );

        Self {
            source: records.source().to_string(),
            dataset: records.id(),
            ingest: records.stats(),
            snapshot,
            insights,
            recommendations,
        }
    }

    /// Whether the filtered range is empty.
    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }
}
