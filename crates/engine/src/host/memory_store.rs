use dashmap::DashMap;
use std::sync::Arc;

use crate::orchestrator::{BoxError, PrecomputedReport, PrecomputedStore};

/// In-process pre-computed reports keyed by hour. Clones share storage.
#[derive(Clone, Default)]
pub struct MemoryReportStore {
    reports: Arc<DashMap<u8, PrecomputedReport>>,
}

impl MemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, hour: u8, report: PrecomputedReport) {
        self.reports.insert(hour, report);
    }

    pub fn get(&self, hour: u8) -> Option<PrecomputedReport> {
        self.reports.get(&hour).map(|r| r.clone())
    }
}

impl PrecomputedStore for MemoryReportStore {
    fn load_hourly_report(&self, hour: u8) -> Result<Option<PrecomputedReport>, BoxError> {
        Ok(self.get(hour))
    }
}
