use chrono::{Duration, TimeZone, Utc};
use insight_common::{MetricKind, MetricSnapshot, ServerStatus};

use insight_engine::aggregator::MetricsAggregator;
use insight_engine::alert::test_harness::{run_harness, Tick};
use insight_engine::alert::{AlertEvaluator, AlertState, Severity};
use insight_engine::config::{AlertsConfig, ThresholdTable};
use insight_engine::health::{Grade, HealthScorer};

fn snap(id: &str, ty: &str, value: f64, status: ServerStatus) -> MetricSnapshot {
    MetricSnapshot {
        server_id: id.into(),
        server_type: ty.into(),
        location: "seoul".into(),
        cpu: value,
        memory: 50.0,
        disk: 50.0,
        network: 50.0,
        status,
    }
}

fn scenario() -> Vec<MetricSnapshot> {
    vec![
        snap("A", "web", 95.0, ServerStatus::Critical),
        snap("B", "web", 82.0, ServerStatus::Warning),
        MetricSnapshot {
            server_id: "C".into(),
            server_type: "db".into(),
            location: "busan".into(),
            cpu: 10.0,
            memory: 10.0,
            disk: 10.0,
            network: 10.0,
            status: ServerStatus::Online,
        },
    ]
}

#[test]
fn example_scenario_evaluate_aggregate_score() {
    let evaluator = AlertEvaluator::new();
    let now = Utc.with_ymd_and_hms(2026, 10, 16, 5, 0, 0).unwrap();

    let firing = evaluator.evaluate(&scenario(), now);
    assert_eq!(firing.len(), 2);
    let a = firing.iter().find(|x| x.server_id == "A").unwrap();
    assert_eq!(a.metric, MetricKind::Cpu);
    assert_eq!(a.severity, Severity::Critical);
    assert_eq!(a.threshold, 90.0);
    let b = firing.iter().find(|x| x.server_id == "B").unwrap();
    assert_eq!(b.severity, Severity::Warning);
    assert_eq!(b.threshold, 80.0);

    let aggregated = MetricsAggregator::default().aggregate(&scenario());
    let c = aggregated.status_counts;
    assert_eq!((c.total, c.online, c.warning, c.critical, c.offline), (3, 1, 1, 1, 0));
    let web = aggregated.server_type("web").unwrap();
    assert_eq!(web.count, 2);
    assert_eq!(web.avg_cpu, 89.0);

    let health = HealthScorer::default().calculate(&aggregated, &firing);
    assert_eq!(health.penalties.critical_alerts, 15);
    assert_eq!(health.penalties.warning_alerts, 5);
    assert_eq!(health.penalties.high_cpu, 0);
    assert_eq!(health.penalties.long_firing, 0);
    assert_eq!(health.score, 80);
    assert_eq!(health.grade, Grade::B);
}

#[test]
fn continuity_then_resolution_across_ticks() {
    let t0 = Utc.with_ymd_and_hms(2026, 10, 16, 5, 0, 0).unwrap();
    let hot = vec![snap("S", "web", 95.0, ServerStatus::Critical)];
    let cool = vec![snap("S", "web", 50.0, ServerStatus::Online)];

    let evaluator = AlertEvaluator::new();
    let first = evaluator.evaluate(&hot, t0);
    let second = evaluator.evaluate(&hot, t0 + Duration::seconds(60));
    assert_eq!(first[0].id, second[0].id);
    assert_eq!(first[0].fired_at, second[0].fired_at);
    assert!(second[0].duration > first[0].duration);

    let third = evaluator.evaluate(&cool, t0 + Duration::seconds(120));
    assert!(third.is_empty());
    assert!(evaluator.firing_alerts().is_empty());

    let history = evaluator.recent_history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, first[0].id);
    assert_eq!(history[0].state, AlertState::Resolved);
    assert_eq!(history[0].duration, 60);
    assert_eq!(history[0].resolved_at, Some(t0 + Duration::seconds(120)));
}

#[test]
fn long_firing_alert_costs_score_after_five_minutes() {
    let t0 = Utc.with_ymd_and_hms(2026, 10, 16, 5, 0, 0).unwrap();
    let snaps = vec![snap("S", "web", 85.0, ServerStatus::Warning)];
    let evaluator = AlertEvaluator::new();
    let scorer = HealthScorer::default();
    let aggregator = MetricsAggregator::default();

    evaluator.evaluate(&snaps, t0);
    let at_five = evaluator.evaluate(&snaps, t0 + Duration::seconds(300));
    let report = scorer.calculate(&aggregator.aggregate(&snaps), &at_five);
    assert_eq!(report.penalties.long_firing, 0);

    let later = evaluator.evaluate(&snaps, t0 + Duration::seconds(301));
    let report = scorer.calculate(&aggregator.aggregate(&snaps), &later);
    assert_eq!(report.penalties.long_firing, 3);
    // warning 5, long-firing 3, avg cpu 85 -> round(7.5) = 8
    assert_eq!(report.score, 84);
}

#[test]
fn severity_downgrade_keeps_duration_running() {
    let t0 = Utc.with_ymd_and_hms(2026, 10, 16, 5, 0, 0).unwrap();
    let evaluator = AlertEvaluator::new();

    evaluator.evaluate(&[snap("S", "web", 95.0, ServerStatus::Critical)], t0);
    let down = evaluator.evaluate(
        &[snap("S", "web", 85.0, ServerStatus::Warning)],
        t0 + Duration::seconds(400),
    );
    assert_eq!(down.len(), 1);
    assert_eq!(down[0].severity, Severity::Warning);
    assert_eq!(down[0].threshold, 80.0);
    assert_eq!(down[0].duration, 400);
    assert_eq!(down[0].fired_at, t0);
}

#[test]
fn harness_history_keeps_most_recent_fifty() {
    let t0 = Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).unwrap();
    let mut ticks = Vec::new();
    for i in 0..60 {
        let id = format!("srv-{i:02}");
        ticks.push(Tick {
            at: t0 + Duration::seconds(i * 20),
            snapshots: vec![snap(&id, "web", 99.0, ServerStatus::Critical)],
        });
        ticks.push(Tick {
            at: t0 + Duration::seconds(i * 20 + 10),
            snapshots: vec![],
        });
    }

    let result = run_harness(ThresholdTable::default(), ticks);
    assert_eq!(result.fired_count, 60);
    assert_eq!(result.resolved_count, 60);
    assert!(result.firing.is_empty());
    assert_eq!(result.history.len(), 50);
    let ids: Vec<&str> = result.history.iter().map(|a| a.server_id.as_str()).collect();
    let expected: Vec<String> = (10..60).map(|i| format!("srv-{i:02}")).collect();
    assert_eq!(ids, expected.iter().map(String::as_str).collect::<Vec<_>>());
}

#[test]
fn custom_thresholds_and_capacity() {
    let mut thresholds = ThresholdTable::default();
    thresholds.cpu.warning = 40.0;
    thresholds.cpu.critical = 60.0;
    let evaluator = AlertEvaluator::with_config(
        thresholds,
        AlertsConfig {
            history_capacity: 2,
            ..AlertsConfig::default()
        },
    );
    let t0 = Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).unwrap();

    let firing = evaluator.evaluate(&[snap("X", "web", 45.0, ServerStatus::Online)], t0);
    assert_eq!(firing[0].severity, Severity::Warning);
    assert_eq!(firing[0].threshold, 40.0);

    for (i, id) in ["P", "Q", "R"].iter().enumerate() {
        let at = t0 + Duration::seconds(10 * (i as i64 + 1));
        evaluator.evaluate(&[snap(id, "web", 70.0, ServerStatus::Critical)], at);
    }
    evaluator.evaluate(&[], t0 + Duration::seconds(100));
    let history = evaluator.recent_history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].server_id, "R");
}

#[test]
fn disappearing_server_resolves() {
    let t0 = Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).unwrap();
    let evaluator = AlertEvaluator::new();
    evaluator.evaluate(&scenario(), t0);
    let firing = evaluator.evaluate(&scenario()[1..], t0 + Duration::seconds(30));
    assert_eq!(firing.len(), 1);
    assert_eq!(firing[0].server_id, "B");
    assert_eq!(evaluator.critical_alerts().len(), 0);
    assert_eq!(evaluator.warning_alerts().len(), 1);
    assert_eq!(evaluator.recent_history()[0].server_id, "A");
}
