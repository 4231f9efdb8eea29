//! JSON rendering of a dashboard, for chart frontends.

use crate::dashboard::Dashboard;

/// Render `dashboard` as pretty-printed JSON.
pub fn render_json(dashboard: &Dashboard) -> serde_json::Result<String> {
    serde_json::to_string_pretty(dashboard)
}
