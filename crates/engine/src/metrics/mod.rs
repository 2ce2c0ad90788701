pub mod engine_metrics;
pub mod exposition;

pub use engine_metrics::EngineMetrics;
pub use exposition::render_prometheus;

#[cfg(test)]
mod tests {
    use super::exposition::render_prometheus;
    use super::engine_metrics::EngineMetrics;
    use std::time::Instant;

    #[test]
    fn counters_increment() {
        let m = EngineMetrics::new();
        m.inc_analyses();
        m.inc_analyses();
        m.inc_precomputed_hits();
        m.add_alerts_fired(3);
        m.add_alerts_resolved(2);
        assert_eq!(m.analyses_val(), 2);
        assert_eq!(m.precomputed_hits_val(), 1);
        assert_eq!(m.alerts_fired_val(), 3);
        assert_eq!(m.alerts_resolved_val(), 2);
    }

    #[test]
    fn gauges_overwrite() {
        let m = EngineMetrics::new();
        m.set_health_score(90);
        m.set_health_score(75);
        m.set_firing_alerts(4);
        assert_eq!(m.health_score_val(), 75);
        assert_eq!(m.firing_alerts_val(), 4);
    }

    #[test]
    fn latency_recording() {
        let m = EngineMetrics::new();
        let start = Instant::now();
        std::thread::sleep(std::time::Duration::from_millis(1));
        m.record_analysis_latency(start);
        let (sum, count) = m.analysis_latency_vals();
        assert!(sum > 0);
        assert_eq!(count, 1);
    }

    #[test]
    fn prometheus_output_contains_metric_names() {
        let m = EngineMetrics::new();
        m.inc_live_runs();
        m.set_health_score(80);
        let output = render_prometheus(&m);
        assert!(output.contains("insight_live_runs_total 1"));
        assert!(output.contains("# TYPE insight_health_score gauge"));
        assert!(output.contains("insight_health_score 80"));
        assert!(output.contains("# TYPE insight_analysis_latency_us summary"));
    }

    #[test]
    fn every_family_has_help_and_type() {
        let output = render_prometheus(&EngineMetrics::default());
        let helps = output.lines().filter(|l| l.starts_with("# HELP ")).count();
        let types = output.lines().filter(|l| l.starts_with("# TYPE ")).count();
        assert_eq!(helps, 9);
        assert_eq!(types, 9);
        assert!(output.contains("# TYPE insight_alerts_fired_total counter"));
        assert!(output.contains("insight_analysis_latency_us_count 0"));
    }
}
