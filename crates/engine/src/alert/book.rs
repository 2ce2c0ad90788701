use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use insight_common::{MetricKind, MetricSnapshot};

use super::fingerprint::fingerprint_string;
use super::history::ResolvedHistory;
use super::record::Alert;
use super::state::{AlertState, Transition};
use super::threshold::{classify, Severity};
use crate::config::ThresholdTable;

/// Result of one evaluation tick.
#[derive(Debug, Clone, Default)]
pub struct Evaluation {
    /// Active alerts after the tick, in the order they were first opened.
    pub firing: Vec<Alert>,
    /// Opened on this tick.
    pub fired: Vec<Alert>,
    /// Closed on this tick, in opening order.
    pub resolved: Vec<Alert>,
}

struct Entry {
    seq: u64,
    alert: Alert,
}

/// Owned alert state: the active set keyed by fingerprint plus the resolved
/// history. Not synchronized; `AlertEvaluator` wraps it.
///
/// Tick time never moves backwards: a tick stamped earlier than one already
/// applied is evaluated at the later time.
pub struct AlertBook {
    active: HashMap<String, Entry>,
    history: ResolvedHistory,
    next_seq: u64,
    last_tick: Option<DateTime<Utc>>,
}

impl AlertBook {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            active: HashMap::new(),
            history: ResolvedHistory::new(history_capacity),
            next_seq: 0,
            last_tick: None,
        }
    }

    pub fn tick(
        &mut self,
        snapshots: &[MetricSnapshot],
        thresholds: &ThresholdTable,
        now: DateTime<Utc>,
        exporter_port: u16,
    ) -> Evaluation {
        let now = match self.last_tick {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last_tick = Some(now);

        let mut crossing: HashSet<String> = HashSet::new();
        let mut fired = Vec::new();

        for snap in snapshots {
            for kind in MetricKind::ALL {
                let value = snap.value(kind);
                let Some((severity, threshold)) = classify(value, thresholds.get(kind)) else {
                    continue;
                };

                let id = fingerprint_string(&snap.server_id, kind);
                crossing.insert(id.clone());

                let current = self.active.get(&id).map(|e| e.alert.state);
                match AlertState::transition(current, true) {
                    Transition::Refresh => self.refresh(&id, value, severity, threshold, now),
                    Transition::Open => {
                        let alert = Alert::open(snap, kind, severity, threshold, now, exporter_port);
                        fired.push(alert.clone());
                        self.open(id, alert);
                    }
                    Transition::Resolve | Transition::Idle => {}
                }
            }
        }

        let mut stale: Vec<(u64, String)> = self
            .active
            .iter()
            .filter(|(id, _)| !crossing.contains(*id))
            .filter(|(_, e)| {
                AlertState::transition(Some(e.alert.state), false) == Transition::Resolve
            })
            .map(|(id, e)| (e.seq, id.clone()))
            .collect();
        stale.sort_unstable_by_key(|(seq, _)| *seq);

        let resolved = stale
            .into_iter()
            .filter_map(|(_, id)| self.resolve(&id, now))
            .collect();

        Evaluation {
            firing: self.firing(),
            fired,
            resolved,
        }
    }

    fn open(&mut self, id: String, alert: Alert) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.active.insert(id, Entry { seq, alert });
    }

    fn refresh(
        &mut self,
        id: &str,
        value: f64,
        severity: Severity,
        threshold: f64,
        now: DateTime<Utc>,
    ) {
        if let Some(entry) = self.active.get_mut(id) {
            entry.alert = entry.alert.refreshed(value, severity, threshold, now);
        }
    }

    fn resolve(&mut self, id: &str, now: DateTime<Utc>) -> Option<Alert> {
        let entry = self.active.remove(id)?;
        let resolved = entry.alert.resolved(now);
        self.history.push(resolved.clone());
        Some(resolved)
    }

    pub fn firing(&self) -> Vec<Alert> {
        let mut entries: Vec<&Entry> = self.active.values().collect();
        entries.sort_unstable_by_key(|e| e.seq);
        entries.into_iter().map(|e| e.alert.clone()).collect()
    }

    pub fn history(&self) -> Vec<Alert> {
        self.history.to_vec()
    }
}
