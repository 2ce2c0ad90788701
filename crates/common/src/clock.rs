use chrono::{DateTime, FixedOffset, Offset, SecondsFormat, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to. Used for replays and tests.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = to;
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Time-of-day partition used to key pre-computed reports and time-series
/// queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBucket {
    /// Hour of day in the configured timezone, 0..=23.
    pub hour: u8,
    /// Sub-hour slot index, `minute / slot_minutes`.
    pub slot: u8,
    /// RFC 3339 with the configured offset, second precision.
    pub timestamp: String,
}

impl TimeBucket {
    pub fn at(instant: DateTime<Utc>, offset: FixedOffset, slot_minutes: u32) -> Self {
        let local = instant.with_timezone(&offset);
        Self {
            hour: local.hour() as u8,
            slot: (local.minute() / slot_minutes.max(1)) as u8,
            timestamp: local.to_rfc3339_opts(SecondsFormat::Secs, false),
        }
    }

    /// Offsets outside a day fall back to UTC.
    pub fn offset_from_minutes(minutes: i32) -> FixedOffset {
        FixedOffset::east_opt(minutes.saturating_mul(60)).unwrap_or_else(|| Utc.fix())
    }
}
