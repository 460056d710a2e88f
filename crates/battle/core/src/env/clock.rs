//! Wall-clock oracle for battle log timestamps.
//!
//! Timestamps are informational. Tests and replay tooling inject a
//! [`FixedClock`] so that two runs with the same seed produce byte-identical
//! logs.

use chrono::{DateTime, Utc};

/// Supplies the timestamp stamped on each log entry.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Unix epoch; the usual choice for golden logs.
    pub fn epoch() -> Self {
        Self(DateTime::<Utc>::default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
