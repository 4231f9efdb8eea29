//! Text bar charts.

use std::fmt;

/// Horizontal bar chart with labelled rows.
#[derive(Debug, Clone)]
pub struct BarChart {
    rows: Vec<(String, f64, String)>,
    width: usize,
}

impl BarChart {
    /// Empty chart whose longest bar is `width` characters.
    pub fn new(width: usize) -> Self {
        Self {
            rows: Vec::new(),
            width: width.max(1),
        }
    }

    /// Add a row with the value printed after the bar.
    pub fn row(mut self, label: impl Into<String>, value: f64, shown: impl Into<String>) -> Self {
        self.rows.push((label.into(), value, shown.into()));
        self
    }

    /// Add a count row.
    pub fn count(self, label: impl Into<String>, count: usize) -> Self {
        self.row(label, count as f64, count.to_string())
    }

    /// Whether the chart has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Bar of `value` scaled against `max`. Non-zero values get at least one mark.
pub fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * width as f64).round() as usize;
    "#".repeat(len.clamp(1, width))
}

impl fmt::Display for BarChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label_width = self.rows.iter().map(|(l, _, _)| l.chars().count()).max().unwrap_or(0);
        let max = self.rows.iter().map(|(_, v, _)| *v).fold(0.0, f64::max);

        for (label, value, shown) in &self.rows {
            let bar = bar(*value, max, self.width);
            writeln!(f, "  {:<lw$}  {:<bw$}  {}", label, bar, shown, lw = label_width, bw = self.width)?;
        }
        Ok(())
    }
}
