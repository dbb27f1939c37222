//! Time sources for the event loop.
//!
//! The loop only ever asks a clock two things: what time it is, and to move
//! forward to the next timer deadline. [`SystemClock`] really waits;
//! [`ManualClock`] jumps instantly, which keeps timer-heavy tests fast and
//! deterministic.

use parking_lot::Mutex;
use std::fmt::Debug;
use std::thread;
use std::time::{Duration, Instant};

/// A monotonic time source measured from the loop's start.
pub trait Clock: Debug + Send + Sync {
    /// Time elapsed since the clock's origin.
    fn now(&self) -> Duration;

    /// Blocks (or jumps) until `now() >= deadline`.
    fn advance_to(&self, deadline: Duration);
}

/// Wall-clock time; `advance_to` sleeps the current thread.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Creates a clock whose origin is the moment of construction.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn advance_to(&self, deadline: Duration) {
        let now = self.now();
        if deadline > now {
            thread::sleep(deadline - now);
        }
    }
}

/// Virtual time that only moves when told to.
///
/// # Examples
///
/// ```
/// use async_runtime::{Clock, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::new();
/// clock.advance_to(Duration::from_millis(2000));
/// assert_eq!(clock.now(), Duration::from_millis(2000));
///
/// // Never goes backwards
/// clock.advance_to(Duration::from_millis(10));
/// assert_eq!(clock.now(), Duration::from_millis(2000));
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Mutex<Duration>,
}

impl ManualClock {
    /// Creates a clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves time forward by `by`.
    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        *self.now.lock()
    }

    fn advance_to(&self, deadline: Duration) {
        let mut now = self.now.lock();
        if deadline > *now {
            *now = deadline;
        }
    }
}
