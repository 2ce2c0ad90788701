use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertState {
    Firing,
    Resolved,
}

/// What the book does with one `(server, metric)` key on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Open,
    Refresh,
    Resolve,
    Idle,
}

impl AlertState {
    pub fn transition(current: Option<Self>, crossing: bool) -> Transition {
        match (current, crossing) {
            (None, true) => Transition::Open,
            (None, false) => Transition::Idle,

            (Some(Self::Firing), true) => Transition::Refresh,
            (Some(Self::Firing), false) => Transition::Resolve,

            // resolved alerts leave the active set, a new crossing starts over
            (Some(Self::Resolved), true) => Transition::Open,
            (Some(Self::Resolved), false) => Transition::Idle,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Firing => "firing",
            Self::Resolved => "resolved",
        }
    }
}
