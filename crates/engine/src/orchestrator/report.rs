use serde::{Deserialize, Serialize};

use super::ports::PrecomputedReport;
use crate::aggregator::{AggregatedMetrics, StatusCounts};
use crate::alert::Alert;
use crate::health::{Grade, HealthReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportSource {
    Live,
    Precomputed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringReport {
    pub timestamp: String,
    pub health: HealthReport,
    pub aggregated: AggregatedMetrics,
    /// Copy of the firing set at report time.
    pub firing_alerts: Vec<Alert>,
    pub source: ReportSource,
}

impl MonitoringReport {
    pub fn from_precomputed(report: &PrecomputedReport, timestamp: String) -> Self {
        Self {
            timestamp,
            health: report.health,
            aggregated: report.aggregated.clone(),
            firing_alerts: report
                .alerts
                .iter()
                .filter(|a| a.is_firing())
                .cloned()
                .collect(),
            source: ReportSource::Precomputed,
        }
    }
}

/// Fixed-field dashboard projection of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringSummary {
    pub timestamp: String,
    pub score: u8,
    pub grade: Grade,
    pub status_counts: StatusCounts,
    pub firing_alerts: usize,
    pub critical_alerts: usize,
    pub avg_cpu: f64,
    pub avg_memory: f64,
    pub source: ReportSource,
}

impl From<&MonitoringReport> for MonitoringSummary {
    fn from(r: &MonitoringReport) -> Self {
        Self {
            timestamp: r.timestamp.clone(),
            score: r.health.score,
            grade: r.health.grade,
            status_counts: r.aggregated.status_counts,
            firing_alerts: r.firing_alerts.len(),
            critical_alerts: r.firing_alerts.iter().filter(|a| a.is_critical()).count(),
            avg_cpu: r.aggregated.averages.cpu,
            avg_memory: r.aggregated.averages.memory,
            source: r.source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::{AlertLabels, AlertState, Severity};
    use crate::health::Penalties;
    use chrono::{TimeZone, Utc};
    use insight_common::MetricKind;

    fn alert(server: &str, severity: Severity, state: AlertState) -> Alert {
        let fired_at = Utc.timestamp_opt(1_760_000_000, 0).unwrap();
        Alert {
            id: format!("{server}-cpu"),
            server_id: server.into(),
            instance: format!("{server}:9100"),
            labels: AlertLabels {
                server_type: "web".into(),
                location: "seoul".into(),
            },
            metric: MetricKind::Cpu,
            value: 95.0,
            threshold: 90.0,
            severity,
            state,
            fired_at,
            resolved_at: (state == AlertState::Resolved).then_some(fired_at),
            duration: 0,
        }
    }

    fn precomputed(alerts: Vec<Alert>) -> PrecomputedReport {
        PrecomputedReport {
            health: HealthReport {
                score: 70,
                grade: Grade::C,
                penalties: Penalties {
                    critical_alerts: 30,
                    ..Penalties::default()
                },
            },
            aggregated: AggregatedMetrics::default(),
            alerts,
            digest_text: None,
        }
    }

    #[test]
    fn precomputed_keeps_only_firing_alerts() {
        let pre = precomputed(vec![
            alert("a", Severity::Critical, AlertState::Firing),
            alert("b", Severity::Critical, AlertState::Resolved),
            alert("c", Severity::Warning, AlertState::Firing),
        ]);
        let report = MonitoringReport::from_precomputed(&pre, "2026-10-16T05:00:00+00:00".into());
        assert_eq!(report.source, ReportSource::Precomputed);
        let ids: Vec<&str> = report.firing_alerts.iter().map(|a| a.server_id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);

        let summary = MonitoringSummary::from(&report);
        assert_eq!(summary.firing_alerts, 2);
        assert_eq!(summary.critical_alerts, 1);
        assert_eq!(summary.grade, Grade::C);
    }
}
