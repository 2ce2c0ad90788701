use insight_common::MetricKind;
use serde::{Deserialize, Serialize};

/// Every policy knob of the pipeline. An empty document yields the
/// compiled-in defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub thresholds: ThresholdTable,
    pub scoring: ScoringWeights,
    pub alerts: AlertsConfig,
    pub aggregation: AggregationConfig,
    pub digest: DigestConfig,
    pub clock: ClockConfig,
    pub host: HostConfig,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
pub struct ThresholdPair {
    pub warning: f64,
    pub critical: f64,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ThresholdTable {
    pub cpu: ThresholdPair,
    pub memory: ThresholdPair,
    pub disk: ThresholdPair,
    pub network: ThresholdPair,
}

impl ThresholdTable {
    pub fn get(&self, kind: MetricKind) -> ThresholdPair {
        match kind {
            MetricKind::Cpu => self.cpu,
            MetricKind::Memory => self.memory,
            MetricKind::Disk => self.disk,
            MetricKind::Network => self.network,
        }
    }
}

impl Default for ThresholdTable {
    fn default() -> Self {
        let host = ThresholdPair {
            warning: 80.0,
            critical: 90.0,
        };
        Self {
            cpu: host,
            memory: host,
            disk: host,
            network: ThresholdPair {
                warning: 70.0,
                critical: 85.0,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ScoringWeights {
    pub critical_weight: u32,
    pub warning_weight: u32,
    pub cpu_baseline: f64,
    pub cpu_factor: f64,
    pub long_firing_secs: i64,
    pub long_firing_weight: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            critical_weight: 15,
            warning_weight: 5,
            cpu_baseline: 70.0,
            cpu_factor: 0.5,
            long_firing_secs: 300,
            long_firing_weight: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AlertsConfig {
    pub history_capacity: usize,
    pub exporter_port: u16,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            history_capacity: 50,
            exporter_port: 9100,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AggregationConfig {
    pub top_n: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self { top_n: 5 }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DigestConfig {
    pub max_alerts: usize,
    pub top_cpu: usize,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            max_alerts: 5,
            top_cpu: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ClockConfig {
    pub utc_offset_minutes: i32,
    pub slot_minutes: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            slot_minutes: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct HostConfig {
    pub snapshots_path: String,
    pub reports_dir: Option<String>,
    pub interval_seconds: u64,
    pub metrics_textfile: Option<String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            snapshots_path: "/var/lib/insight/snapshots.json".to_string(),
            reports_dir: None,
            interval_seconds: 60,
            metrics_textfile: None,
        }
    }
}
