use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Default)]
pub struct EngineMetrics {
    analyses: AtomicU64,
    precomputed_hits: AtomicU64,
    live_runs: AtomicU64,
    provider_errors: AtomicU64,
    alerts_fired: AtomicU64,
    alerts_resolved: AtomicU64,
    firing_alerts: AtomicU64,
    health_score: AtomicU64,
    analysis_latency_sum_us: AtomicU64,
    analysis_latency_count: AtomicU64,
}

impl EngineMetrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_analyses(&self) {
        self.analyses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_precomputed_hits(&self) {
        self.precomputed_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_live_runs(&self) {
        self.live_runs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_provider_errors(&self) {
        self.provider_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_alerts_fired(&self, count: u64) {
        self.alerts_fired.fetch_add(count, Ordering::Relaxed);
    }

    pub fn add_alerts_resolved(&self, count: u64) {
        self.alerts_resolved.fetch_add(count, Ordering::Relaxed);
    }

    pub fn set_firing_alerts(&self, count: u64) {
        self.firing_alerts.store(count, Ordering::Relaxed);
    }

    pub fn set_health_score(&self, score: u8) {
        self.health_score.store(score as u64, Ordering::Relaxed);
    }

    pub fn record_analysis_latency(&self, start: Instant) {
        let us = start.elapsed().as_micros() as u64;
        self.analysis_latency_sum_us.fetch_add(us, Ordering::Relaxed);
        self.analysis_latency_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn analyses_val(&self) -> u64 {
        self.analyses.load(Ordering::Relaxed)
    }

    pub fn precomputed_hits_val(&self) -> u64 {
        self.precomputed_hits.load(Ordering::Relaxed)
    }

    pub fn live_runs_val(&self) -> u64 {
        self.live_runs.load(Ordering::Relaxed)
    }

    pub fn provider_errors_val(&self) -> u64 {
        self.provider_errors.load(Ordering::Relaxed)
    }

    pub fn alerts_fired_val(&self) -> u64 {
        self.alerts_fired.load(Ordering::Relaxed)
    }

    pub fn alerts_resolved_val(&self) -> u64 {
        self.alerts_resolved.load(Ordering::Relaxed)
    }

    pub fn firing_alerts_val(&self) -> u64 {
        self.firing_alerts.load(Ordering::Relaxed)
    }

    pub fn health_score_val(&self) -> u64 {
        self.health_score.load(Ordering::Relaxed)
    }

    pub fn analysis_latency_vals(&self) -> (u64, u64) {
        (
            self.analysis_latency_sum_us.load(Ordering::Relaxed),
            self.analysis_latency_count.load(Ordering::Relaxed),
        )
    }
}
