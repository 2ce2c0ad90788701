use std::path::PathBuf;

use insight_common::{validate_snapshot, MetricSnapshot};
use serde_json::Value;

use crate::orchestrator::{BoxError, MetricsProvider};

/// Reads a JSON array of raw snapshot objects from disk on every call.
///
/// Entries that fail validation are skipped; an unreadable file or a
/// document that is not an array is an error.
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    path: PathBuf,
}

impl JsonFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MetricsProvider for JsonFileProvider {
    fn all_server_metrics(&self) -> Result<Vec<MetricSnapshot>, BoxError> {
        let raw = std::fs::read_to_string(&self.path)?;
        let doc: Value = serde_json::from_str(&raw)?;
        let entries = doc
            .as_array()
            .ok_or_else(|| format!("{}: expected a JSON array", self.path.display()))?;

        let mut snapshots = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            match validate_snapshot(entry) {
                Ok(snap) => snapshots.push(snap),
                Err(e) => tracing::warn!(index, error = %e, "skipping invalid snapshot"),
            }
        }
        Ok(snapshots)
    }
}
