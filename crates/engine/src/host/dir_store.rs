use std::io::ErrorKind;
use std::path::PathBuf;

use crate::orchestrator::{BoxError, PrecomputedReport, PrecomputedStore};

/// Pre-computed reports as `<dir>/hour-HH.json`.
#[derive(Debug, Clone)]
pub struct DirReportStore {
    dir: PathBuf,
}

impl DirReportStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, hour: u8) -> PathBuf {
        self.dir.join(format!("hour-{hour:02}.json"))
    }
}

impl PrecomputedStore for DirReportStore {
    fn load_hourly_report(&self, hour: u8) -> Result<Option<PrecomputedReport>, BoxError> {
        let path = self.path_for(hour);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let report = serde_json::from_str(&raw)
            .map_err(|e| format!("{}: {e}", path.display()))?;
        Ok(Some(report))
    }
}
