mod grade;
mod scorer;

pub use grade::Grade;
pub use scorer::{HealthReport, HealthScorer, Penalties};
