use std::sync::{Arc, Mutex, RwLock};

use chrono::{DateTime, Utc};
use insight_common::MetricSnapshot;

use super::book::{AlertBook, Evaluation};
use super::record::Alert;
use super::threshold::Severity;
use crate::config::{AlertsConfig, ThresholdTable};

/// Firing set and resolved history as published together after one tick.
#[derive(Debug, Clone)]
pub struct AlertViews {
    pub firing: Arc<[Alert]>,
    pub history: Arc<[Alert]>,
}

impl Default for AlertViews {
    fn default() -> Self {
        Self {
            firing: Arc::from(Vec::<Alert>::new()),
            history: Arc::from(Vec::<Alert>::new()),
        }
    }
}

/// Threshold alerting with a lifecycle that spans calls.
///
/// Mutation is serialized behind one mutex. After every tick the firing set
/// and the resolved history are republished as one immutable pair, so the
/// query helpers never wait on an evaluation in progress and never see one
/// view ahead of the other.
pub struct AlertEvaluator {
    thresholds: ThresholdTable,
    exporter_port: u16,
    book: Mutex<AlertBook>,
    views: RwLock<AlertViews>,
}

impl Default for AlertEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertEvaluator {
    pub fn new() -> Self {
        Self::with_thresholds(ThresholdTable::default())
    }

    pub fn with_thresholds(thresholds: ThresholdTable) -> Self {
        Self::with_config(thresholds, AlertsConfig::default())
    }

    pub fn with_config(thresholds: ThresholdTable, alerts: AlertsConfig) -> Self {
        Self {
            thresholds,
            exporter_port: alerts.exporter_port,
            book: Mutex::new(AlertBook::new(alerts.history_capacity)),
            views: RwLock::new(AlertViews::default()),
        }
    }

    /// Returns the alerts firing after this tick, in opening order.
    pub fn evaluate(&self, snapshots: &[MetricSnapshot], now: DateTime<Utc>) -> Vec<Alert> {
        self.evaluate_tick(snapshots, now).firing
    }

    pub fn evaluate_tick(&self, snapshots: &[MetricSnapshot], now: DateTime<Utc>) -> Evaluation {
        let mut book = self.book.lock().unwrap_or_else(|e| e.into_inner());
        let evaluation = book.tick(snapshots, &self.thresholds, now, self.exporter_port);

        for alert in &evaluation.fired {
            tracing::info!(
                alert_id = %alert.id,
                server_id = %alert.server_id,
                metric = %alert.metric,
                severity = alert.severity.as_str(),
                value = alert.value,
                threshold = alert.threshold,
                "alert firing"
            );
        }
        for alert in &evaluation.resolved {
            tracing::info!(
                alert_id = %alert.id,
                server_id = %alert.server_id,
                metric = %alert.metric,
                duration_s = alert.duration,
                "alert resolved"
            );
        }
        tracing::debug!(
            servers = snapshots.len(),
            firing = evaluation.firing.len(),
            fired = evaluation.fired.len(),
            resolved = evaluation.resolved.len(),
            "evaluation tick"
        );

        self.publish(&evaluation.firing, &book);
        evaluation
    }

    // Caller holds the book lock.
    fn publish(&self, firing: &[Alert], book: &AlertBook) {
        let views = AlertViews {
            firing: Arc::from(firing.to_vec()),
            history: Arc::from(book.history()),
        };
        *self.views.write().unwrap_or_else(|e| e.into_inner()) = views;
    }

    /// Both views from the same tick.
    pub fn views(&self) -> AlertViews {
        self.views.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn firing_view(&self) -> Arc<[Alert]> {
        self.views().firing
    }

    pub fn firing_alerts(&self) -> Vec<Alert> {
        self.firing_view().to_vec()
    }

    pub fn critical_alerts(&self) -> Vec<Alert> {
        self.by_severity(Severity::Critical)
    }

    pub fn warning_alerts(&self) -> Vec<Alert> {
        self.by_severity(Severity::Warning)
    }

    /// Resolved alerts, oldest first.
    pub fn recent_history(&self) -> Vec<Alert> {
        self.views().history.to_vec()
    }

    fn by_severity(&self, severity: Severity) -> Vec<Alert> {
        self.firing_view()
            .iter()
            .filter(|a| a.is_firing() && a.severity == severity)
            .cloned()
            .collect()
    }
}
