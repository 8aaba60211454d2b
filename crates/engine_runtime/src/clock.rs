//! Wall-clock sampling behind a seam.
//!
//! The scheduler never touches `Instant` directly; it reads time through a
//! [`TimeSource`] so the loop's timing properties can be tested without
//! real sleeping.

use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// A monotonic time source for the engine loop.
pub trait TimeSource: Send + Sync {
    /// Monotonic time elapsed since an arbitrary fixed origin.
    fn now(&self) -> Duration;

    /// Coarse blocking sleep. No sub-interval precision is guaranteed.
    fn sleep(&self, duration: Duration);
}

/// Production time source anchored to a monotonic [`Instant`].
#[derive(Debug)]
pub struct SystemTimeSource {
    origin: Instant,
}

impl SystemTimeSource {
    /// Create a time source anchored to "now".
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Hand-driven time source for tests and headless runs.
///
/// `sleep` advances the clock instead of blocking, so a loop that yields
/// through its time source still makes progress under test.
#[derive(Debug, Default)]
pub struct ManualTimeSource {
    now: Mutex<Duration>,
}

impl ManualTimeSource {
    /// Create a manual clock starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by `delta`.
    pub fn advance(&self, delta: Duration) {
        *self.now.lock() += delta;
    }

    /// Set the clock to an absolute value.
    pub fn set(&self, now: Duration) {
        *self.now.lock() = now;
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> Duration {
        *self.now.lock()
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}
