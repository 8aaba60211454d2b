//! Fixed-timestep scheduling policy.
//!
//! The scheduler owns the time accumulator and decides, per loop iteration,
//! how many simulation ticks to dispatch and whether a render frame is due.
//! Ticks always run with an identical, reproducible `dt`, decoupling
//! simulation correctness from frame-rate jitter; render frames are gated
//! by elapsed wall time alone.

use std::time::Duration;

use tracing::warn;

use crate::config::EngineConfig;

/// Upper bound on wall time accrued in a single iteration. A stall longer
/// than this (debugger, suspend) is forgiven rather than replayed.
pub const MAX_ACCRUAL: Duration = Duration::from_millis(250);

/// The ticks owed for one loop iteration, each with the same fixed `dt`.
#[derive(Debug, Clone, Copy)]
pub struct TickBatch {
    /// Number of ticks to dispatch, in wall-clock order.
    pub count: u32,
    /// The fixed simulation step for every tick in the batch.
    pub dt: Duration,
}

impl TickBatch {
    /// The fixed step as fractional seconds, as handed to scripts.
    #[must_use]
    pub fn dt_seconds(&self) -> f64 {
        self.dt.as_secs_f64()
    }
}

/// Fixed-tick / variable-render dispatch policy.
///
/// State is initialised to "now" at loop start and mutated once per
/// iteration; it is not persisted across restarts.
#[derive(Debug)]
pub struct FixedStepScheduler {
    tick_interval: Duration,
    render_interval: Duration,
    max_ticks_per_frame: u32,
    accumulator: Duration,
    last_tick_time: Duration,
    last_render_time: Duration,
}

impl FixedStepScheduler {
    /// Create a scheduler from the engine's rate configuration, anchored at
    /// `now`.
    #[must_use]
    pub fn new(config: &EngineConfig, now: Duration) -> Self {
        // Floor to whole nanoseconds so n ticks always fit in n intervals
        // of accrued time; rounding up would owe 59 ticks per second at 60.
        Self {
            tick_interval: Duration::from_nanos(
                1_000_000_000 / u64::from(config.max_updates_per_second),
            ),
            render_interval: Duration::from_nanos(
                1_000_000_000 / u64::from(config.max_frames_per_second),
            ),
            max_ticks_per_frame: config.max_updates_per_frame,
            accumulator: Duration::ZERO,
            last_tick_time: now,
            last_render_time: now,
        }
    }

    /// The fixed simulation step.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// The minimum wall time between two render dispatches.
    #[must_use]
    pub fn render_interval(&self) -> Duration {
        self.render_interval
    }

    /// Accumulated-but-undispatched simulated time.
    #[must_use]
    pub fn accumulator(&self) -> Duration {
        self.accumulator
    }

    /// Accrue elapsed wall time and drain whole tick intervals into a batch.
    ///
    /// When `paused`, elapsed time is consumed but nothing accrues and the
    /// batch is empty, so resuming continues exactly where the simulation
    /// left off with no catch-up burst.
    ///
    /// The batch never exceeds the catch-up cap; residual accumulated time
    /// is carried to later iterations and logged as an overload, not an
    /// error.
    pub fn begin(&mut self, now: Duration, paused: bool) -> TickBatch {
        let elapsed = now.saturating_sub(self.last_tick_time);
        self.last_tick_time = now;

        if paused {
            return TickBatch {
                count: 0,
                dt: self.tick_interval,
            };
        }

        self.accumulator += elapsed.min(MAX_ACCRUAL);

        let mut count = 0;
        while self.accumulator >= self.tick_interval && count < self.max_ticks_per_frame {
            self.accumulator -= self.tick_interval;
            count += 1;
        }

        if self.accumulator >= self.tick_interval {
            warn!(
                pending_ms = self.accumulator.as_millis() as u64,
                cap = self.max_ticks_per_frame,
                "tick processing is behind; carrying accumulated time forward"
            );
        }

        TickBatch {
            count,
            dt: self.tick_interval,
        }
    }

    /// Returns `true` if a render frame is due, consuming the interval.
    ///
    /// Fires iff `now - last_render_time >= render_interval`; two renders
    /// are never less than the render interval apart.
    pub fn poll_render(&mut self, now: Duration) -> bool {
        if now.saturating_sub(self.last_render_time) >= self.render_interval {
            self.last_render_time = now;
            true
        } else {
            false
        }
    }

    /// Wall time remaining until the next render is due. Used for the
    /// rate-limiting sleep when vertical sync is off.
    #[must_use]
    pub fn until_next_render(&self, now: Duration) -> Duration {
        (self.last_render_time + self.render_interval).saturating_sub(now)
    }
}
