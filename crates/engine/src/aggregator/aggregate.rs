use std::collections::HashMap;

use insight_common::{MetricKind, MetricSnapshot};

use super::ranking::top_by;
use super::stats::{AggregatedMetrics, GlobalAverages, ServerTypeStats, StatusCounts};
use crate::config::{AggregationConfig, AlertsConfig};

/// Stateless: identical input gives identical output.
#[derive(Debug, Clone, Copy)]
pub struct MetricsAggregator {
    top_n: usize,
    exporter_port: u16,
}

impl Default for MetricsAggregator {
    fn default() -> Self {
        Self::new(AggregationConfig::default(), AlertsConfig::default().exporter_port)
    }
}

impl MetricsAggregator {
    pub fn new(config: AggregationConfig, exporter_port: u16) -> Self {
        Self {
            top_n: config.top_n,
            exporter_port,
        }
    }

    pub fn aggregate(&self, snapshots: &[MetricSnapshot]) -> AggregatedMetrics {
        let mut status_counts = StatusCounts::default();
        for snap in snapshots {
            status_counts.record(snap.status);
        }

        AggregatedMetrics {
            status_counts,
            by_server_type: group_by_type(snapshots),
            top_cpu: top_by(snapshots, MetricKind::Cpu, self.top_n, self.exporter_port),
            top_memory: top_by(snapshots, MetricKind::Memory, self.top_n, self.exporter_port),
            averages: GlobalAverages {
                cpu: rounded_avg(snapshots, MetricKind::Cpu),
                memory: rounded_avg(snapshots, MetricKind::Memory),
                disk: rounded_avg(snapshots, MetricKind::Disk),
                network: rounded_avg(snapshots, MetricKind::Network),
            },
        }
    }
}

fn group_by_type(snapshots: &[MetricSnapshot]) -> Vec<ServerTypeStats> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&MetricSnapshot>> = HashMap::new();
    for snap in snapshots {
        let key = snap.server_type.as_str();
        groups
            .entry(key)
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(snap);
    }

    order
        .into_iter()
        .filter_map(|key| groups.remove(key).map(|members| type_stats(key, &members)))
        .collect()
}

fn type_stats(server_type: &str, members: &[&MetricSnapshot]) -> ServerTypeStats {
    let mut counts = StatusCounts::default();
    for m in members {
        counts.record(m.status);
    }

    let avg = |kind: MetricKind| {
        let sum: f64 = members.iter().map(|m| m.value(kind)).sum();
        (sum / members.len().max(1) as f64).round()
    };
    let max = |kind: MetricKind| {
        members
            .iter()
            .map(|m| m.value(kind))
            .reduce(f64::max)
            .unwrap_or(0.0)
    };

    ServerTypeStats {
        server_type: server_type.to_string(),
        count: members.len(),
        avg_cpu: avg(MetricKind::Cpu),
        avg_memory: avg(MetricKind::Memory),
        avg_disk: avg(MetricKind::Disk),
        avg_network: avg(MetricKind::Network),
        max_cpu: max(MetricKind::Cpu),
        max_memory: max(MetricKind::Memory),
        online: counts.online,
        warning: counts.warning,
        critical: counts.critical,
        offline: counts.offline,
    }
}

fn rounded_avg(snapshots: &[MetricSnapshot], kind: MetricKind) -> f64 {
    let sum: f64 = snapshots.iter().map(|s| s.value(kind)).sum();
    (sum / snapshots.len().max(1) as f64).round()
}
