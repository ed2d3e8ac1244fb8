//! Time sources for event timestamps

use chrono::{DateTime, SecondsFormat, Utc};

/// Supplies the instant stamped on each record
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock UTC time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// RFC 3339 with a nine-digit fraction and `Z`, so lines sort by time
pub fn timestamp<C: Clock + ?Sized>(clock: &C) -> String {
    clock.now().to_rfc3339_opts(SecondsFormat::Nanos, true)
}
