//! Monotonic millisecond clocks for the frame loop

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of monotonic time that can also wait
pub trait Clock {
    /// Milliseconds since the clock started
    fn now_ms(&self) -> u64;
    /// Block for `duration`
    fn sleep(&mut self, duration: Duration);
}

/// Wall clock backed by [`Instant`]
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Clock that only moves when told to.
///
/// Clones share the same time, so a test can keep a handle and advance it
/// from inside callbacks while the loop owns another. Sleeping advances
/// time by the requested amount.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }

    fn sleep(&mut self, duration: Duration) {
        // Never stall a loop under test, even for sub-millisecond sleeps
        self.advance((duration.as_millis() as u64).max(1));
    }
}
