//! Insight generator - ordered threshold rules over a snapshot.

use crate::config::InsightConfig;
use crate::insight::{Insight, InsightKind, Recommendation, RecommendationKind, Severity};
use deskpulse_core::{AgentMetrics, MetricsSnapshot, ResponseComparison};
use tracing::debug;

/// Derives insights and recommendations from snapshots.
///
/// Output depends only on the snapshot and the thresholds, and rules always
/// run in the same order, so equal snapshots give equal lists.
#[derive(Debug, Clone, Default)]
pub struct InsightGenerator {
    config: InsightConfig,
}

impl InsightGenerator {
    /// Create a generator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the thresholds.
    pub fn with_config(mut self, config: InsightConfig) -> Self {
        self.config = config;
        self
    }

    /// Thresholds in use.
    pub fn config(&self) -> &InsightConfig {
        &self.config
    }

    /// Run every rule against `snapshot`, in order.
    ///
    /// An empty snapshot yields no insights.
    pub fn generate(&self, snapshot: &MetricsSnapshot) -> Vec<Insight> {
        if snapshot.is_empty() {
            return Vec::new();
        }

        let mut insights = Vec::new();
        self.volume_balance(snapshot, &mut insights);
        self.response_time(snapshot, &mut insights);
        for agent in snapshot.roster_agents() {
            self.peak_load(agent, &mut insights);
        }
        for agent in snapshot.roster_agents() {
            self.slow_response(agent, &mut insights);
        }

        debug!("Generated {} insight(s)", insights.len());
        insights
    }

    /// Insight texts, in rule order.
    pub fn messages(&self, snapshot: &MetricsSnapshot) -> Vec<String> {
        self.generate(snapshot).into_iter().map(|i| i.message).collect()
    }

    /// Suggested actions for `snapshot`, given the insights generated for it.
    pub fn recommend(&self, snapshot: &MetricsSnapshot, insights: &[Insight]) -> Vec<Recommendation> {
        if snapshot.is_empty() {
            return Vec::new();
        }

        let mut recommendations = Vec::new();

        let imbalanced = insights.iter().any(|i| i.kind == InsightKind::Imbalance);
        if let (true, Some(delta)) = (imbalanced, snapshot.comparison.delta()) {
            if let (Some(leader), Some(trailer)) = (delta.leader.as_ref(), delta.trailer()) {
                recommendations.push(Recommendation {
                    kind: RecommendationKind::Redistribute,
                    message: format!(
                        "Redistribute incoming conversations: {} is handling {} more than {} ({:.1}% gap)",
                        leader,
                        delta.gap(),
                        trailer,
                        delta.percent
                    ),
                });
            }
        }

        let diverging = insights.iter().any(|i| i.kind == InsightKind::ResponseGap);
        if let (true, ResponseComparison::Faster { faster, slower, .. }) = (diverging, &snapshot.response) {
            recommendations.push(Recommendation {
                kind: RecommendationKind::Training,
                message: format!(
                    "Training: {} can shorten response times by following {}'s practices",
                    slower, faster
                ),
            });
        }

        recommendations.push(Recommendation {
            kind: RecommendationKind::Monitoring,
            message: "Monitoring: follow these metrics daily to spot trends early".to_string(),
        });
        recommendations.push(Recommendation {
            kind: RecommendationKind::Target,
            message: format!(
                "Target: keep volume balanced and average wait under {:.0} minutes",
                self.config.wait_target_minutes
            ),
        });

        recommendations
    }

    fn volume_balance(&self, snapshot: &MetricsSnapshot, out: &mut Vec<Insight>) {
        let Some(delta) = snapshot.comparison.delta() else {
            return;
        };

        if delta.percent > self.config.imbalance_pct {
            let (Some(leader), Some(trailer)) = (delta.leader.as_ref(), delta.trailer()) else {
                return;
            };
            out.push(Insight {
                kind: InsightKind::Imbalance,
                severity: Severity::Warning,
                agent: Some(leader.clone()),
                message: format!(
                    "{} handled {} more interactions than {} ({:.1}% gap); consider redistributing the workload",
                    leader,
                    delta.gap(),
                    trailer,
                    delta.percent
                ),
            });
        } else {
            out.push(Insight {
                kind: InsightKind::Balanced,
                severity: Severity::Ok,
                agent: None,
                message: format!(
                    "Volume is balanced between {} and {} (difference: {:.1}%)",
                    delta.first, delta.second, delta.percent
                ),
            });
        }
    }

    fn response_time(&self, snapshot: &MetricsSnapshot, out: &mut Vec<Insight>) {
        let Some(delta) = snapshot.comparison.delta() else {
            return;
        };
        let (Some(first), Some(second)) = (snapshot.agent(&delta.first), snapshot.agent(&delta.second)) else {
            return;
        };
        if first.average_wait <= 0.0 || second.average_wait <= 0.0 {
            return;
        }

        let gap = (first.average_wait - second.average_wait).abs();
        if gap > self.config.wait_gap_minutes {
            let (fast, slow) = if first.average_wait < second.average_wait {
                (first, second)
            } else {
                (second, first)
            };
            out.push(Insight {
                kind: InsightKind::ResponseGap,
                severity: Severity::Warning,
                agent: Some(slow.agent.clone()),
                message: format!(
                    "Large response-time gap: {} averages {:.1} min of wait against {:.1} min for {} ({:.1} min apart)",
                    slow.agent, slow.average_wait, fast.average_wait, fast.agent, gap
                ),
            });
        } else {
            out.push(Insight {
                kind: InsightKind::ResponseSimilar,
                severity: Severity::Ok,
                agent: None,
                message: format!("Response times are similar (difference: {:.1} min)", gap),
            });
        }
    }

    fn peak_load(&self, agent: &AgentMetrics, out: &mut Vec<Insight>) {
        let Some(peak) = agent.peak_hour else {
            return;
        };
        if agent.total < self.config.peak_min_volume.max(1) {
            return;
        }

        let share = agent.hourly.share_pct(peak.hour);
        if share > self.config.peak_load_pct {
            out.push(Insight {
                kind: InsightKind::PeakLoad,
                severity: Severity::Warning,
                agent: Some(agent.agent.clone()),
                message: format!(
                    "{} concentrates {:.0}% of the volume at {:02}:00 ({} of {} interactions)",
                    agent.agent, share, peak.hour, peak.count, agent.total
                ),
            });
        }
    }

    fn slow_response(&self, agent: &AgentMetrics, out: &mut Vec<Insight>) {
        if agent.waits_recorded == 0 || agent.average_wait <= self.config.wait_target_minutes {
            return;
        }
        out.push(Insight {
            kind: InsightKind::SlowResponse,
            severity: Severity::Warning,
            agent: Some(agent.agent.clone()),
            message: format!(
                "{} averages {:.1} min of wait, above the {:.0} min target",
                agent.agent, agent.average_wait, self.config.wait_target_minutes
            ),
        });
    }
}
