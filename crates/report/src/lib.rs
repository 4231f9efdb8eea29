//! Presentation layer for deskpulse.
//!
//! Assembles a [`Dashboard`] from a record set and renders it as terminal
//! text with bar charts, or as JSON.

#![warn(missing_docs)]

pub mod chart;
pub mod dashboard;
pub mod json;
pub mod text;

pub use chart::BarChart;
pub use dashboard::Dashboard;
pub use json::render_json;
pub use text::{render_text, TextReport, DEFAULT_CHART_WIDTH};
