use insight_common::{MetricKind, MetricSnapshot};

use super::stats::TopEntry;

/// Highest `n` snapshots by `metric`, descending. Equal values keep their
/// input order.
pub fn top_by(
    snapshots: &[MetricSnapshot],
    metric: MetricKind,
    n: usize,
    exporter_port: u16,
) -> Vec<TopEntry> {
    let mut ranked: Vec<&MetricSnapshot> = snapshots.iter().collect();
    // sort_by is stable; total_cmp keeps NaN from breaking the ordering
    ranked.sort_by(|a, b| b.value(metric).total_cmp(&a.value(metric)));
    ranked
        .into_iter()
        .take(n)
        .map(|s| TopEntry {
            server_id: s.server_id.clone(),
            instance: format!("{}:{}", s.server_id, exporter_port),
            server_type: s.server_type.clone(),
            value: s.value(metric),
        })
        .collect()
}
