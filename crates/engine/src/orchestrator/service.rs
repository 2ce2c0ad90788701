use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, FixedOffset, Utc};
use insight_common::{Clock, SystemClock, TimeBucket};

use super::cache::HourlyCache;
use super::digest::{render_digest, render_unavailable};
use super::error::OrchestratorError;
use super::ports::{
    MetricsProvider, PrecomputedReport, PrecomputedStore, QueryContext, QueryExecutor, QueryResult,
};
use super::report::{MonitoringReport, MonitoringSummary, ReportSource};
use crate::aggregator::MetricsAggregator;
use crate::alert::AlertEvaluator;
use crate::config::{DigestConfig, EngineConfig};
use crate::health::HealthScorer;
use crate::metrics::EngineMetrics;

/// Owns the one long-lived `AlertEvaluator` and runs the per-call pipeline:
/// evaluate, aggregate, score, assemble.
///
/// A pre-computed report for the current hour, when the store has one, is
/// served instead of running the pipeline. The host builds exactly one of
/// these per process and shares it (it is `Send + Sync`).
pub struct MonitoringOrchestrator {
    evaluator: AlertEvaluator,
    aggregator: MetricsAggregator,
    scorer: HealthScorer,
    provider: Arc<dyn MetricsProvider>,
    store: Option<Arc<dyn PrecomputedStore>>,
    executor: Option<Arc<dyn QueryExecutor>>,
    clock: Arc<dyn Clock>,
    cache: HourlyCache,
    digest: DigestConfig,
    offset: FixedOffset,
    slot_minutes: u32,
    metrics: Arc<EngineMetrics>,
}

impl MonitoringOrchestrator {
    pub fn new(config: &EngineConfig, provider: Arc<dyn MetricsProvider>) -> Self {
        Self {
            evaluator: AlertEvaluator::with_config(config.thresholds, config.alerts),
            aggregator: MetricsAggregator::new(config.aggregation, config.alerts.exporter_port),
            scorer: HealthScorer::new(config.scoring),
            provider,
            store: None,
            executor: None,
            clock: Arc::new(SystemClock),
            cache: HourlyCache::new(),
            digest: config.digest,
            offset: TimeBucket::offset_from_minutes(config.clock.utc_offset_minutes),
            slot_minutes: config.clock.slot_minutes,
            metrics: EngineMetrics::new(),
        }
    }

    pub fn with_store(mut self, store: Arc<dyn PrecomputedStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_executor(mut self, executor: Arc<dyn QueryExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<EngineMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn evaluator(&self) -> &AlertEvaluator {
        &self.evaluator
    }

    pub fn metrics(&self) -> &Arc<EngineMetrics> {
        &self.metrics
    }

    pub fn current_bucket(&self) -> TimeBucket {
        TimeBucket::at(self.clock.now(), self.offset, self.slot_minutes)
    }

    pub fn analyze(&self) -> Result<MonitoringReport, OrchestratorError> {
        let now = self.clock.now();
        let bucket = TimeBucket::at(now, self.offset, self.slot_minutes);
        let _span = analyze_span(&bucket).entered();

        let pre = self.precomputed(bucket.hour);
        self.analyze_with(now, bucket, pre)
    }

    /// Never fails. A stored digest for the hour wins; otherwise the current
    /// report is rendered, or a stand-in when no report can be produced.
    pub fn digest(&self) -> String {
        let now = self.clock.now();
        let bucket = TimeBucket::at(now, self.offset, self.slot_minutes);
        let _span = analyze_span(&bucket).entered();

        let pre = self.precomputed(bucket.hour);
        if let Some(text) = pre
            .as_ref()
            .and_then(|p| p.digest_text.as_deref())
            .filter(|t| !t.trim().is_empty())
        {
            return text.to_string();
        }

        let timestamp = bucket.timestamp.clone();
        match self.analyze_with(now, bucket, pre) {
            Ok(report) => render_digest(&report, &self.digest),
            Err(e) => render_unavailable(&timestamp, &e.to_string()),
        }
    }

    pub fn summary(&self) -> Result<MonitoringSummary, OrchestratorError> {
        self.analyze().map(|r| MonitoringSummary::from(&r))
    }

    /// Hands `expr` to the configured executor with the current snapshot
    /// list, the per-hour history and the current hour and slot.
    pub fn query_metric(&self, expr: &str) -> Result<QueryResult, OrchestratorError> {
        let executor = self
            .executor
            .as_ref()
            .ok_or(OrchestratorError::NoQueryExecutor)?;
        let bucket = self.current_bucket();

        let current = self.fetch_snapshots()?;
        let history = self.provider.hourly_history().map_err(|e| {
            self.metrics.inc_provider_errors();
            tracing::error!(error = %e, "hourly history unavailable");
            OrchestratorError::Provider(e)
        })?;

        let ctx = QueryContext {
            current: &current,
            history: &history,
            hour: bucket.hour,
            slot: bucket.slot,
        };
        executor.execute(expr, &ctx).map_err(|e| {
            tracing::error!(error = %e, expr, "query executor failed");
            OrchestratorError::Query(e)
        })
    }

    // The precomputed lookup for `bucket.hour` has already happened.
    fn analyze_with(
        &self,
        now: DateTime<Utc>,
        bucket: TimeBucket,
        pre: Option<Arc<PrecomputedReport>>,
    ) -> Result<MonitoringReport, OrchestratorError> {
        let start = Instant::now();
        self.metrics.inc_analyses();

        let report = match pre {
            Some(pre) => {
                self.metrics.inc_precomputed_hits();
                MonitoringReport::from_precomputed(&pre, bucket.timestamp)
            }
            None => self.analyze_live(now, bucket.timestamp)?,
        };

        self.metrics.set_health_score(report.health.score);
        self.metrics.set_firing_alerts(report.firing_alerts.len() as u64);
        self.metrics.record_analysis_latency(start);
        Ok(report)
    }

    fn analyze_live(
        &self,
        now: DateTime<Utc>,
        timestamp: String,
    ) -> Result<MonitoringReport, OrchestratorError> {
        let snapshots = self.fetch_snapshots()?;
        self.metrics.inc_live_runs();

        let evaluation = self.evaluator.evaluate_tick(&snapshots, now);
        self.metrics.add_alerts_fired(evaluation.fired.len() as u64);
        self.metrics.add_alerts_resolved(evaluation.resolved.len() as u64);

        let aggregated = self.aggregator.aggregate(&snapshots);
        let health = self.scorer.calculate(&aggregated, &evaluation.firing);

        tracing::info!(
            servers = snapshots.len(),
            firing = evaluation.firing.len(),
            score = health.score,
            grade = health.grade.as_str(),
            "live analysis complete"
        );

        Ok(MonitoringReport {
            timestamp,
            health,
            aggregated,
            firing_alerts: evaluation.firing,
            source: ReportSource::Live,
        })
    }

    fn fetch_snapshots(&self) -> Result<Vec<insight_common::MetricSnapshot>, OrchestratorError> {
        self.provider.all_server_metrics().map_err(|e| {
            self.metrics.inc_provider_errors();
            tracing::error!(error = %e, "metrics provider failed");
            OrchestratorError::Provider(e)
        })
    }

    fn precomputed(&self, hour: u8) -> Option<Arc<PrecomputedReport>> {
        let store = self.store.as_ref()?;

        if let Some(hit) = self.cache.get(hour) {
            tracing::info!(hour, "precomputed report cache hit");
            return Some(hit);
        }

        match store.load_hourly_report(hour) {
            Ok(Some(report)) => {
                tracing::info!(hour, "precomputed report cache miss, loaded from store");
                let report = Arc::new(report);
                self.cache.put(hour, report.clone());
                Some(report)
            }
            Ok(None) => {
                tracing::info!(hour, "precomputed report cache miss, running live");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, hour, "precomputed store failed, running live");
                None
            }
        }
    }
}

fn analyze_span(bucket: &TimeBucket) -> tracing::Span {
    let trace_id = uuid::Uuid::new_v4().to_string();
    tracing::info_span!("analyze", %trace_id, hour = bucket.hour, slot = bucket.slot)
}
