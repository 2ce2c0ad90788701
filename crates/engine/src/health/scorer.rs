use serde::{Deserialize, Serialize};

use super::grade::Grade;
use crate::aggregator::AggregatedMetrics;
use crate::alert::{Alert, Severity};
use crate::config::ScoringWeights;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Penalties {
    pub critical_alerts: u64,
    pub warning_alerts: u64,
    pub high_cpu: u64,
    pub long_firing: u64,
}

impl Penalties {
    pub fn total(&self) -> u64 {
        self.critical_alerts
            .saturating_add(self.warning_alerts)
            .saturating_add(self.high_cpu)
            .saturating_add(self.long_firing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub score: u8,
    pub grade: Grade,
    pub penalties: Penalties,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HealthScorer {
    weights: ScoringWeights,
}

impl HealthScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// `score = clamp(100 - sum(penalties), 0, 100)`.
    pub fn calculate(&self, aggregated: &AggregatedMetrics, firing: &[Alert]) -> HealthReport {
        let w = &self.weights;

        let critical = firing
            .iter()
            .filter(|a| a.severity == Severity::Critical)
            .count() as u64;
        let warning = firing
            .iter()
            .filter(|a| a.severity == Severity::Warning)
            .count() as u64;
        let long_running = firing
            .iter()
            .filter(|a| a.duration > w.long_firing_secs)
            .count() as u64;

        let penalties = Penalties {
            critical_alerts: critical.saturating_mul(w.critical_weight as u64),
            warning_alerts: warning.saturating_mul(w.warning_weight as u64),
            high_cpu: cpu_penalty(aggregated.averages.cpu, w.cpu_baseline, w.cpu_factor),
            long_firing: long_running.saturating_mul(w.long_firing_weight as u64),
        };

        let score = 100u64.saturating_sub(penalties.total()) as u8;
        HealthReport {
            score,
            grade: Grade::from_score(score),
            penalties,
        }
    }
}

// NaN never reaches the baseline, so it costs nothing; huge values saturate.
fn cpu_penalty(avg_cpu: f64, baseline: f64, factor: f64) -> u64 {
    if avg_cpu >= baseline {
        ((avg_cpu - baseline) * factor).round() as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::GlobalAverages;
    use crate::alert::{AlertLabels, AlertState};
    use chrono::{TimeZone, Utc};
    use insight_common::MetricKind;

    fn alert(server: &str, severity: Severity, duration: i64) -> Alert {
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
            state: AlertState::Firing,
            fired_at: Utc.timestamp_opt(1_760_000_000, 0).unwrap(),
            resolved_at: None,
            duration,
        }
    }

    fn with_cpu(cpu: f64) -> AggregatedMetrics {
        AggregatedMetrics {
            averages: GlobalAverages {
                cpu,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn perfect_when_quiet() {
        let r = HealthScorer::default().calculate(&with_cpu(20.0), &[]);
        assert_eq!(r.score, 100);
        assert_eq!(r.grade, Grade::A);
        assert_eq!(r.penalties, Penalties::default());
    }

    #[test]
    fn scenario_scores_eighty() {
        let alerts = vec![alert("A", Severity::Critical, 0), alert("B", Severity::Warning, 0)];
        let r = HealthScorer::default().calculate(&with_cpu(62.0), &alerts);
        assert_eq!(r.penalties.critical_alerts, 15);
        assert_eq!(r.penalties.warning_alerts, 5);
        assert_eq!(r.penalties.high_cpu, 0);
        assert_eq!(r.penalties.long_firing, 0);
        assert_eq!(r.score, 80);
        assert_eq!(r.grade, Grade::B);
    }

    #[test]
    fn high_cpu_penalty_rounds() {
        let s = HealthScorer::default();
        assert_eq!(s.calculate(&with_cpu(70.0), &[]).penalties.high_cpu, 0);
        assert_eq!(s.calculate(&with_cpu(75.0), &[]).penalties.high_cpu, 3);
        assert_eq!(s.calculate(&with_cpu(80.0), &[]).penalties.high_cpu, 5);
        assert_eq!(s.calculate(&with_cpu(69.0), &[]).penalties.high_cpu, 0);
    }

    #[test]
    fn long_firing_is_strictly_greater() {
        let s = HealthScorer::default();
        let at_limit = s.calculate(&with_cpu(0.0), &[alert("a", Severity::Warning, 300)]);
        let past = s.calculate(&with_cpu(0.0), &[alert("a", Severity::Warning, 301)]);
        assert_eq!(at_limit.penalties.long_firing, 0);
        assert_eq!(past.penalties.long_firing, 3);
    }

    #[test]
    fn score_clamps_at_zero() {
        let alerts: Vec<_> = (0..10)
            .map(|i| alert(&format!("s{i}"), Severity::Critical, 1000))
            .collect();
        let r = HealthScorer::default().calculate(&with_cpu(100.0), &alerts);
        assert_eq!(r.score, 0);
        assert_eq!(r.grade, Grade::F);
        assert_eq!(100u64.saturating_sub(r.penalties.total()), r.score as u64);
    }

    #[test]
    fn malformed_cpu_pins_instead_of_panicking() {
        let s = HealthScorer::default();
        assert_eq!(s.calculate(&with_cpu(f64::NAN), &[]).score, 100);
        assert_eq!(s.calculate(&with_cpu(f64::INFINITY), &[]).score, 0);
        assert_eq!(s.calculate(&with_cpu(-50.0), &[]).score, 100);
    }

    #[test]
    fn more_critical_alerts_never_raise_score() {
        let s = HealthScorer::default();
        let agg = with_cpu(50.0);
        let mut alerts = Vec::new();
        let mut last = s.calculate(&agg, &alerts).score;
        for i in 0..10 {
            alerts.push(alert(&format!("s{i}"), Severity::Critical, 0));
            let next = s.calculate(&agg, &alerts).score;
            assert!(next <= last);
            last = next;
        }
    }

    #[test]
    fn hotter_cpu_never_raises_score() {
        let s = HealthScorer::default();
        let alerts = vec![alert("a", Severity::Warning, 0)];
        let cool = s.calculate(&with_cpu(60.0), &alerts).score;
        let hot = s.calculate(&with_cpu(80.0), &alerts).score;
        assert!(hot <= cool);
    }

    #[test]
    fn calculate_is_idempotent() {
        let s = HealthScorer::default();
        let agg = with_cpu(77.0);
        let alerts = vec![alert("a", Severity::Critical, 400)];
        assert_eq!(s.calculate(&agg, &alerts), s.calculate(&agg, &alerts));
    }

    #[test]
    fn custom_weights() {
        let weights = ScoringWeights {
            critical_weight: 30,
            ..ScoringWeights::default()
        };
        let r = HealthScorer::new(weights)
            .calculate(&with_cpu(0.0), &[alert("a", Severity::Critical, 0)]);
        assert_eq!(r.score, 70);
        assert_eq!(r.grade, Grade::C);
    }
}
