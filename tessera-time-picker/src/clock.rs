//! Wall-clock sources for the "now" action and the display fallback.

use chrono::{Local, NaiveTime, Timelike};
use parking_lot::Mutex;

/// Source of the current time of day.
pub trait Clock: Send + Sync {
    /// Current time of day.
    fn now(&self) -> NaiveTime;
}

/// Local wall-clock time, truncated to whole seconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveTime {
        let now = Local::now().time();
        now.with_nanosecond(0).unwrap_or(now)
    }
}

/// Clock returning a settable time.
#[derive(Debug)]
pub struct FixedClock {
    time: Mutex<NaiveTime>,
}

impl FixedClock {
    /// Creates a clock stopped at `time`.
    pub fn new(time: NaiveTime) -> Self {
        Self {
            time: Mutex::new(time),
        }
    }

    /// Moves the clock to `time`.
    pub fn set(&self, time: NaiveTime) {
        *self.time.lock() = time;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveTime {
        *self.time.lock()
    }
}
