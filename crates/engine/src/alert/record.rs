use chrono::{DateTime, Utc};
use insight_common::{MetricKind, MetricSnapshot};
use serde::{Deserialize, Serialize};

use super::fingerprint::fingerprint_string;
use super::state::AlertState;
use super::threshold::Severity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertLabels {
    pub server_type: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub server_id: String,
    pub instance: String,
    pub labels: AlertLabels,
    pub metric: MetricKind,
    pub value: f64,
    pub threshold: f64,
    pub severity: Severity,
    pub state: AlertState,
    pub fired_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    /// Whole seconds since `fired_at`; frozen once resolved.
    pub duration: i64,
}

impl Alert {
    pub(crate) fn open(
        snapshot: &MetricSnapshot,
        metric: MetricKind,
        severity: Severity,
        threshold: f64,
        now: DateTime<Utc>,
        exporter_port: u16,
    ) -> Self {
        Self {
            id: fingerprint_string(&snapshot.server_id, metric),
            server_id: snapshot.server_id.clone(),
            instance: format!("{}:{}", snapshot.server_id, exporter_port),
            labels: AlertLabels {
                server_type: snapshot.server_type.clone(),
                location: snapshot.location.clone(),
            },
            metric,
            value: snapshot.value(metric),
            threshold,
            severity,
            state: AlertState::Firing,
            fired_at: now,
            resolved_at: None,
            duration: 0,
        }
    }

    /// Same condition observed again. Severity may move either way; the
    /// original `fired_at` is kept.
    pub(crate) fn refreshed(
        &self,
        value: f64,
        severity: Severity,
        threshold: f64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            value,
            severity,
            threshold,
            duration: (now - self.fired_at).num_seconds(),
            ..self.clone()
        }
    }

    pub(crate) fn resolved(&self, now: DateTime<Utc>) -> Self {
        Self {
            state: AlertState::Resolved,
            resolved_at: Some(now),
            ..self.clone()
        }
    }

    pub fn is_firing(&self) -> bool {
        self.state == AlertState::Firing
    }

    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }
}
