use std::fmt::Write;

use super::engine_metrics::EngineMetrics;

#[derive(Clone, Copy)]
enum Kind {
    Counter,
    Gauge,
}

impl Kind {
    fn as_str(self) -> &'static str {
        match self {
            Kind::Counter => "counter",
            Kind::Gauge => "gauge",
        }
    }
}

/// Prometheus text format, every family prefixed `insight_`.
pub fn render_prometheus(m: &EngineMetrics) -> String {
    let families: [(&str, Kind, &str, u64); 8] = [
        ("analyses_total", Kind::Counter, "Reports produced.", m.analyses_val()),
        (
            "precomputed_hits_total",
            Kind::Counter,
            "Reports served from a precomputed bundle.",
            m.precomputed_hits_val(),
        ),
        ("live_runs_total", Kind::Counter, "Live pipeline runs.", m.live_runs_val()),
        (
            "provider_errors_total",
            Kind::Counter,
            "Failed metrics provider calls.",
            m.provider_errors_val(),
        ),
        ("alerts_fired_total", Kind::Counter, "Alerts opened.", m.alerts_fired_val()),
        ("alerts_resolved_total", Kind::Counter, "Alerts resolved.", m.alerts_resolved_val()),
        ("firing_alerts", Kind::Gauge, "Alerts firing in the last report.", m.firing_alerts_val()),
        ("health_score", Kind::Gauge, "Health score of the last report.", m.health_score_val()),
    ];

    let mut out = String::with_capacity(1536);
    for (name, kind, help, value) in families {
        family_header(&mut out, name, kind.as_str(), help);
        let _ = writeln!(out, "insight_{name} {value}");
    }

    let (sum, count) = m.analysis_latency_vals();
    family_header(
        &mut out,
        "analysis_latency_us",
        "summary",
        "Time spent producing a report, microseconds.",
    );
    let _ = writeln!(out, "insight_analysis_latency_us_sum {sum}");
    let _ = writeln!(out, "insight_analysis_latency_us_count {count}");

    out
}

fn family_header(out: &mut String, name: &str, kind: &str, help: &str) {
    let _ = writeln!(out, "# HELP insight_{name} {help}");
    let _ = writeln!(out, "# TYPE insight_{name} {kind}");
}
