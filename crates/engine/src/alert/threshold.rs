use serde::{Deserialize, Serialize};

use crate::config::ThresholdPair;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Warning => "WARN",
            Self::Critical => "CRIT",
        }
    }
}

/// Maps a gauge value to the severity it crosses and the boundary crossed.
/// Boundaries are inclusive; NaN crosses nothing.
pub fn classify(value: f64, pair: ThresholdPair) -> Option<(Severity, f64)> {
    if value >= pair.critical {
        Some((Severity::Critical, pair.critical))
    } else if value >= pair.warning {
        Some((Severity::Warning, pair.warning))
    } else {
        None
    }
}
