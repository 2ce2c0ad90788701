mod cache;
mod digest;
mod error;
pub mod ports;
mod report;
mod service;

pub use cache::HourlyCache;
pub use digest::{render_digest, render_unavailable};
pub use error::OrchestratorError;
pub use ports::{
    BoxError, HourlyDataset, MetricsProvider, PrecomputedReport, PrecomputedStore, QueryContext,
    QueryExecutor, QueryResult, Sample, Series,
};
pub use report::{MonitoringReport, MonitoringSummary, ReportSource};
pub use service::MonitoringOrchestrator;
