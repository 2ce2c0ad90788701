//! Collaborators the host plugs into the orchestrator.

use std::collections::BTreeMap;

use insight_common::MetricSnapshot;
use serde::{Deserialize, Serialize};

use crate::aggregator::AggregatedMetrics;
use crate::alert::Alert;
use crate::health::HealthReport;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Source of the live per-server snapshot list.
pub trait MetricsProvider: Send + Sync {
    fn all_server_metrics(&self) -> Result<Vec<MetricSnapshot>, BoxError>;

    /// Per-hour datasets handed to the query executor.
    fn hourly_history(&self) -> Result<Vec<HourlyDataset>, BoxError> {
        Ok(Vec::new())
    }
}

/// Out-of-band reports keyed by hour of day.
pub trait PrecomputedStore: Send + Sync {
    fn load_hourly_report(&self, hour: u8) -> Result<Option<PrecomputedReport>, BoxError>;
}

/// Black-box time-series query engine.
pub trait QueryExecutor: Send + Sync {
    fn execute(&self, expr: &str, ctx: &QueryContext<'_>) -> Result<QueryResult, BoxError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrecomputedReport {
    pub health: HealthReport,
    pub aggregated: AggregatedMetrics,
    pub alerts: Vec<Alert>,
    #[serde(default)]
    pub digest_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyDataset {
    pub hour: u8,
    pub snapshots: Vec<MetricSnapshot>,
}

pub struct QueryContext<'a> {
    pub current: &'a [MetricSnapshot],
    pub history: &'a [HourlyDataset],
    pub hour: u8,
    pub slot: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub labels: BTreeMap<String, String>,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub labels: BTreeMap<String, String>,
    /// `(unix seconds, value)` pairs, oldest first.
    pub points: Vec<(i64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "resultType", content = "result", rename_all = "lowercase")]
pub enum QueryResult {
    Scalar(f64),
    Vector(Vec<Sample>),
    Matrix(Vec<Series>),
}
