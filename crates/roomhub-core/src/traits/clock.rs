//! Injectable wall-clock abstraction.
//!
//! The past-booking check and the lifecycle sweeper both depend on the
//! current time, so the time source is a trait rather than direct
//! `Utc::now()` calls. Production code uses [`SystemClock`]; tests use
//! [`ManualClock`] to pin and advance time deterministically.

use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};

/// A source of the current wall-clock time.
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Return the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
///
/// Suitable for tests only.
#[derive(Debug)]
pub struct ManualClock {
    /// The pinned current instant.
    now: RwLock<DateTime<Utc>>,
}

impl ManualClock {
    /// Creates a manual clock pinned at the given instant.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    /// Pin the clock to a new instant.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.write().expect("clock lock poisoned") = now;
    }

    /// Advance the clock by a duration.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.write().expect("clock lock poisoned");
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read().expect("clock lock poisoned")
    }
}
