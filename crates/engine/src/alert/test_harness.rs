use chrono::{DateTime, Utc};
use insight_common::MetricSnapshot;

use crate::alert::evaluator::AlertEvaluator;
use crate::alert::record::Alert;
use crate::config::{AlertsConfig, ThresholdTable};

pub struct Tick {
    pub at: DateTime<Utc>,
    pub snapshots: Vec<MetricSnapshot>,
}

pub struct HarnessResult {
    pub firing: Vec<Alert>,
    pub history: Vec<Alert>,
    pub fired_count: usize,
    pub resolved_count: usize,
}

/// Replays a sequence of ticks through a fresh evaluator.
pub fn run_harness(thresholds: ThresholdTable, ticks: Vec<Tick>) -> HarnessResult {
    let evaluator = AlertEvaluator::with_config(thresholds, AlertsConfig::default());
    let mut fired_count = 0;
    let mut resolved_count = 0;

    for tick in &ticks {
        let evaluation = evaluator.evaluate_tick(&tick.snapshots, tick.at);
        fired_count += evaluation.fired.len();
        resolved_count += evaluation.resolved.len();
    }

    HarnessResult {
        firing: evaluator.firing_alerts(),
        history: evaluator.recent_history(),
        fired_count,
        resolved_count,
    }
}
