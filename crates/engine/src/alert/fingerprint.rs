use std::hash::{DefaultHasher, Hash, Hasher};

use insight_common::MetricKind;

/// Identity of an alert condition: one per `(server, metric)` pair, stable
/// for the process lifetime.
pub fn fingerprint(server_id: &str, metric: MetricKind) -> u64 {
    let mut hasher = DefaultHasher::new();
    (server_id, metric.as_str()).hash(&mut hasher);
    hasher.finish()
}

pub fn fingerprint_string(server_id: &str, metric: MetricKind) -> String {
    format!("{:016x}", fingerprint(server_id, metric))
}
