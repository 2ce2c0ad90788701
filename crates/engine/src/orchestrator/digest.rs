//! Compact line-oriented rendering of a report for LLM prompts.
//!
//! Shape, each section omitted when it has nothing to show:
//!
//! ```text
//! [monitoring] 2026-10-16T14:00:00+09:00
//! Health: 80/100 (B)
//! Scrape: 3 targets, 3 up, 0 down | online 1, warning 1, critical 1
//! Alerts (2 firing):
//! - CRIT A cpu 95% >= 90% (0s)
//! - WARN B cpu 82% >= 80% (0s)
//! CPU by type: web 89%, db 10%
//! Top CPU: A 95%, B 82%, C 10%
//! ```

use std::fmt::Write;

use super::report::MonitoringReport;
use crate::alert::Alert;
use crate::config::DigestConfig;

pub fn render_digest(report: &MonitoringReport, config: &DigestConfig) -> String {
    let mut out = String::with_capacity(512);
    let h = &report.health;
    let c = &report.aggregated.status_counts;

    let _ = writeln!(out, "[monitoring] {}", report.timestamp);
    let _ = writeln!(out, "Health: {}/100 ({})", h.score, h.grade);
    let _ = writeln!(
        out,
        "Scrape: {} targets, {} up, {} down | online {}, warning {}, critical {}",
        c.total,
        c.total.saturating_sub(c.offline),
        c.offline,
        c.online,
        c.warning,
        c.critical
    );

    write_alerts(&mut out, &report.firing_alerts, config.max_alerts);

    let types = &report.aggregated.by_server_type;
    if !types.is_empty() {
        let parts: Vec<String> = types
            .iter()
            .map(|t| format!("{} {:.0}%", t.server_type, t.avg_cpu))
            .collect();
        let _ = writeln!(out, "CPU by type: {}", parts.join(", "));
    }

    let top: Vec<String> = report
        .aggregated
        .top_cpu
        .iter()
        .take(config.top_cpu)
        .map(|t| format!("{} {:.0}%", t.server_id, t.value))
        .collect();
    if !top.is_empty() {
        let _ = writeln!(out, "Top CPU: {}", top.join(", "));
    }

    out.truncate(out.trim_end().len());
    out
}

/// Stand-in digest when no report could be produced.
pub fn render_unavailable(timestamp: &str, reason: &str) -> String {
    format!("[monitoring] {timestamp}\nHealth: unavailable ({reason})")
}

fn write_alerts(out: &mut String, alerts: &[Alert], limit: usize) {
    if alerts.is_empty() || limit == 0 {
        return;
    }

    let mut ordered: Vec<&Alert> = alerts.iter().collect();
    ordered.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| b.value.total_cmp(&a.value))
    });

    let _ = writeln!(out, "Alerts ({} firing):", alerts.len());
    for a in ordered.iter().take(limit) {
        let _ = writeln!(
            out,
            "- {} {} {} {:.0}% >= {:.0}% ({}s)",
            a.severity.label(),
            a.server_id,
            a.metric,
            a.value,
            a.threshold,
            a.duration
        );
    }
    if alerts.len() > limit {
        let _ = writeln!(out, "- (+{} more)", alerts.len() - limit);
    }
}
