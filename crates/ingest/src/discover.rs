//! Locating the export when no file is named.

use crate::error::{IngestError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Find the largest `.xlsx` file directly inside `dir`.
///
/// Office lock files (`~$name.xlsx`) are skipped. Equal sizes resolve to the
/// lexicographically smallest name so the choice is stable.
pub async fn discover_workbook(dir: impl AsRef<Path>) -> Result<PathBuf> {
    let dir = dir.as_ref();
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut best: Option<(u64, PathBuf)> = None;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !is_workbook(&path) {
            continue;
        }
        let meta = entry.metadata().await?;
        if !meta.is_file() {
            continue;
        }
        let size = meta.len();
        debug!("Candidate workbook {} ({} bytes)", path.display(), size);

        let better = match &best {
            None => true,
            Some((best_size, best_path)) => size > *best_size || (size == *best_size && path < *best_path),
        };
        if better {
            best = Some((size, path));
        }
    }

    best.map(|(_, path)| path)
        .ok_or_else(|| IngestError::NoWorkbookFound(dir.to_path_buf()))
}

fn is_workbook(path: &Path) -> bool {
    let is_lock = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with("~$"));
    let is_xlsx = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"));
    is_xlsx && !is_lock
}
