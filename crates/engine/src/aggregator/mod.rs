mod aggregate;
mod ranking;
mod stats;

pub use aggregate::MetricsAggregator;
pub use ranking::top_by;
pub use stats::{AggregatedMetrics, GlobalAverages, ServerTypeStats, StatusCounts, TopEntry};
