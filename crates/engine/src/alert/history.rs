use std::collections::VecDeque;

use super::record::Alert;

/// Bounded log of resolved alerts, oldest evicted first.
#[derive(Debug, Clone)]
pub struct ResolvedHistory {
    capacity: usize,
    entries: VecDeque<Alert>,
}

impl ResolvedHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, alert: Alert) {
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(alert);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first.
    pub fn to_vec(&self) -> Vec<Alert> {
        self.entries.iter().cloned().collect()
    }
}
