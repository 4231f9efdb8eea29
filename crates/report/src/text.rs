//! Terminal rendering of a dashboard.

use crate::chart::BarChart;
use crate::dashboard::Dashboard;
use deskpulse_core::{AgentMetrics, Comparison, DayFilter, ResponseComparison};
use deskpulse_insights::Severity;
use std::fmt;

/// Default length of the longest bar.
pub const DEFAULT_CHART_WIDTH: usize = 32;

/// Text rendering of a [`Dashboard`].
#[derive(Debug, Clone, Copy)]
pub struct TextReport<'a> {
    dashboard: &'a Dashboard,
    width: usize,
}

impl<'a> TextReport<'a> {
    /// Render `dashboard` with the default chart width.
    pub fn new(dashboard: &'a Dashboard) -> Self {
        Self {
            dashboard,
            width: DEFAULT_CHART_WIDTH,
        }
    }

    /// Set the chart width.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    fn header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.dashboard;
        writeln!(f, "ATTENDANCE DASHBOARD")?;
        writeln!(f, "Source:  {}", d.source)?;
        writeln!(f, "Dataset: {}", d.dataset)?;
        writeln!(f, "Filter:  {}", describe_filter(&d.snapshot.filter))?;
        writeln!(
            f,
            "Rows:    {} read, {} without a tracked agent, {} with an invalid timestamp",
            d.ingest.rows_read, d.ingest.unmatched_agent, d.ingest.invalid_timestamp
        )
    }

    fn key_metrics(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.dashboard.snapshot;
        section(f, "Key metrics")?;
        writeln!(f, "  Total interactions  {}", s.overall.total)?;
        writeln!(f, "  Days in range       {}", s.overall.days)?;
        writeln!(f, "  Daily average       {:.1}", s.overall.daily_average)?;
        for agent in &s.agents {
            writeln!(
                f,
                "  {:<18}  {} ({:.1}/day)",
                agent.agent.as_str(),
                agent.total,
                agent.daily_average
            )?;
        }
        Ok(())
    }

    fn comparison(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.dashboard.snapshot;
        section(f, "Comparison")?;

        match &s.comparison {
            Comparison::NoData => writeln!(f, "  Volume:   no data")?,
            Comparison::Delta(delta) => match &delta.leader {
                Some(leader) => writeln!(
                    f,
                    "  Volume:   {} leads ({} vs {}, {:+} / {:.1}%)",
                    leader,
                    delta.first_total.max(delta.second_total),
                    delta.first_total.min(delta.second_total),
                    delta.gap(),
                    delta.percent
                )?,
                None => writeln!(f, "  Volume:   tie at {} each", delta.first_total)?,
            },
        }

        match &s.response {
            ResponseComparison::NoData => writeln!(f, "  Response: no data")?,
            ResponseComparison::Tie => writeln!(f, "  Response: tie")?,
            ResponseComparison::Faster { faster, gap_minutes, .. } => {
                let avg = s.agent(faster).map_or(0.0, |m| m.average_wait);
                writeln!(
                    f,
                    "  Response: {} is faster (avg {:.1} min, {:.1} min ahead)",
                    faster, avg, gap_minutes
                )?
            }
        }

        for change in &s.day_over_day {
            writeln!(
                f,
                "  {} {} -> {}: {} -> {} ({:+})",
                change.agent,
                change.previous_date,
                change.current_date,
                change.previous,
                change.current,
                change.change
            )?;
        }
        Ok(())
    }

    fn daily(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.dashboard.snapshot;
        section(f, "Volume per day")?;
        let mut chart = BarChart::new(self.width);
        for day in &s.daily {
            for count in &day.counts {
                chart = chart.count(format!("{} {}", day.date, count.agent), count.count);
            }
        }
        write!(f, "{}", chart)
    }

    fn hourly(&self, f: &mut fmt::Formatter<'_>, agent: &AgentMetrics) -> fmt::Result {
        match agent.peak_hour {
            Some(peak) => writeln!(f, "  {} (peak {:02}:00, {})", agent.agent, peak.hour, peak.count)?,
            None => {
                writeln!(f, "  {} (no interactions)", agent.agent)?;
                return Ok(());
            }
        }

        let counts = agent.hourly.counts();
        let first = counts.iter().position(|&c| c > 0).unwrap_or(0);
        let last = counts.iter().rposition(|&c| c > 0).unwrap_or(0);
        let mut chart = BarChart::new(self.width);
        for hour in first..=last {
            chart = chart.count(format!("  {:02}:00", hour), counts[hour] as usize);
        }
        write!(f, "{}", chart)
    }

    fn waits(&self, f: &mut fmt::Formatter<'_>, agent: &AgentMetrics) -> fmt::Result {
        if agent.total == 0 {
            return Ok(());
        }
        if agent.waits_recorded == 0 {
            writeln!(f, "  {}: no wait data", agent.agent)?;
            return Ok(());
        }
        writeln!(f, "  {} (avg {:.1} min)", agent.agent, agent.average_wait)?;
        let mut chart = BarChart::new(self.width);
        for band in &agent.wait_bands {
            chart = chart.count(format!("  {}", band.band), band.count);
        }
        write!(f, "{}", chart)
    }

    fn insights(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.dashboard;
        section(f, "Insights")?;
        if d.insights.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for insight in &d.insights {
            let marker = match insight.severity {
                Severity::Ok => "ok",
                Severity::Warning => "!!",
            };
            writeln!(f, "  [{}] {}", marker, insight)?;
        }

        section(f, "Recommendations")?;
        for rec in &d.recommendations {
            writeln!(f, "  - {}", rec)?;
        }
        Ok(())
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.header(f)?;

        if self.dashboard.is_empty() {
            writeln!(f)?;
            return match self.dashboard.snapshot.filter {
                DayFilter::Day(date) => writeln!(f, "No interactions on {}.", date),
                DayFilter::All => writeln!(f, "No interactions for the tracked agents."),
            };
        }

        self.key_metrics(f)?;
        self.comparison(f)?;
        self.daily(f)?;

        section(f, "Interactions per hour")?;
        for agent in &self.dashboard.snapshot.agents {
            self.hourly(f, agent)?;
        }

        section(f, "Wait after assignment")?;
        for agent in &self.dashboard.snapshot.agents {
            self.waits(f, agent)?;
        }

        self.insights(f)
    }
}

fn section(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "== {} ==", title)
}

fn describe_filter(filter: &DayFilter) -> String {
    match filter {
        DayFilter::All => "all data".to_string(),
        DayFilter::Day(date) => format!("{} only", date.format("%d/%m/%Y")),
    }
}

/// Render `dashboard` as terminal text.
pub fn render_text(dashboard: &Dashboard) -> String {
    TextReport::new(dashboard).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use deskpulse_core::{InteractionRecord, RecordSet, WaitTime};
    use deskpulse_insights::InsightGenerator;
    use deskpulse_metrics::MetricsEngine;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn records() -> RecordSet {
        RecordSet::from_records(vec![
            InteractionRecord::new("Naura", at("2025-07-22 09:00")).with_wait(WaitTime::from_minutes(3.0)),
            InteractionRecord::new("Naura", at("2025-07-22 09:15")),
            InteractionRecord::new("Diessy", at("2025-07-22 14:00")),
        ])
    }

    fn dashboard(filter: DayFilter) -> Dashboard {
        Dashboard::build(&records(), filter, &MetricsEngine::default(), &InsightGenerator::new())
    }

    #[test]
    fn test_full_report_sections() {
        let text = render_text(&dashboard(DayFilter::All));
        for heading in [
            "== Key metrics ==",
            "== Comparison ==",
            "== Volume per day ==",
            "== Interactions per hour ==",
            "== Wait after assignment ==",
            "== Insights ==",
            "== Recommendations ==",
        ] {
            assert!(text.contains(heading), "missing {heading}");
        }
        assert!(text.contains("Naura (peak 09:00, 2)"));
        assert!(text.contains("Diessy (peak 14:00, 1)"));
        assert!(text.contains("Volume:   Naura leads (2 vs 1, +1 / 50.0%)"));
        assert!(text.contains("Diessy: no wait data"));
        assert!(text.contains("Filter:  all data"));
    }

    #[test]
    fn test_empty_state() {
        let text = render_text(&dashboard("2025-07-23".parse().unwrap()));
        assert!(text.contains("No interactions on 2025-07-23."));
        assert!(!text.contains("== Insights =="));
    }
}
