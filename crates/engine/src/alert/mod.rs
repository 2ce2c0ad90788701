mod book;
mod evaluator;
mod fingerprint;
mod history;
mod record;
mod state;
mod threshold;
pub mod test_harness;

pub use book::{AlertBook, Evaluation};
pub use evaluator::{AlertEvaluator, AlertViews};
pub use fingerprint::{fingerprint, fingerprint_string};
pub use history::ResolvedHistory;
pub use record::{Alert, AlertLabels};
pub use state::{AlertState, Transition};
pub use threshold::{classify, Severity};
