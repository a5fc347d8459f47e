//! Time-source seam for the task timer.
//!
//! The timer only needs "what time is it now" at start and stop; putting
//! that behind a trait lets accumulation logic be tested against a
//! manually-driven clock instead of real sleeps.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A source of the current time.
///
/// Implementations must be monotonic-enough for interval subtraction at
/// millisecond resolution; the timer never interprets absolute values, only
/// differences between two reads.
pub trait Clock {
    /// Returns the current time.
    fn now(&self) -> Instant;
}

/// Production clock backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same offset, so a test can keep one handle and advance
/// it while a timer owns another. Intended for deterministic tests; not
/// `Send`.
#[derive(Debug, Clone)]
pub struct ManualClock {
    base: Instant,
    offset: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Creates a clock frozen at the moment of construction.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + self.offset.get()
    }
}
