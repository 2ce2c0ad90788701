pub mod clock;
pub mod snapshot;
pub mod validate;

pub use clock::{Clock, ManualClock, SystemClock, TimeBucket};
pub use snapshot::{MetricKind, MetricSnapshot, ServerStatus};
pub use validate::{validate_snapshot, ValidationError};
