use std::sync::{Arc, RwLock};

use super::ports::PrecomputedReport;

/// Single-entry cache keyed by hour. A different hour replaces the entry.
#[derive(Default)]
pub struct HourlyCache {
    entry: RwLock<Option<(u8, Arc<PrecomputedReport>)>>,
}

impl HourlyCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, hour: u8) -> Option<Arc<PrecomputedReport>> {
        let entry = self.entry.read().unwrap_or_else(|e| e.into_inner());
        match entry.as_ref() {
            Some((cached, report)) if *cached == hour => Some(report.clone()),
            _ => None,
        }
    }

    pub fn put(&self, hour: u8, report: Arc<PrecomputedReport>) {
        *self.entry.write().unwrap_or_else(|e| e.into_inner()) = Some((hour, report));
    }
}
