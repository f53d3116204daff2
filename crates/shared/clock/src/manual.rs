use bazaar_core::Timestamp;
use bazaar_ports::Clock;
use chrono::{Duration, Utc};
use parking_lot::RwLock;

/// Clock whose time only changes through [`ManualClock::set`] or
/// [`ManualClock::advance`]
///
/// Thread-safe, so one instance can be shared (behind an `Arc`) between a
/// test and the engine under test.
#[derive(Debug)]
pub struct ManualClock {
    current: RwLock<Timestamp>,
}

impl ManualClock {
    /// Create a clock frozen at `at`
    pub fn at(at: Timestamp) -> Self {
        Self {
            current: RwLock::new(at),
        }
    }

    /// Create a clock frozen at the current wall time
    pub fn starting_now() -> Self {
        Self::at(Utc::now())
    }

    /// Jump to an absolute time (backwards jumps are allowed)
    pub fn set(&self, at: Timestamp) {
        *self.current.write() = at;
    }

    /// Move time forward (or backward for a negative duration)
    pub fn advance(&self, by: Duration) {
        let mut current = self.current.write();
        *current += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::starting_now()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.current.read()
    }

    fn name(&self) -> &str {
        "ManualClock"
    }
}
