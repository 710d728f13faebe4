//! Injectable time source.

use chrono::{DateTime, NaiveDate, Utc};

/// Source of the capture instant for a run.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar date of `now()` in UTC, the default run date.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
