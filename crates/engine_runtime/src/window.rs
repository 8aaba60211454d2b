//! Window contract consumed by the loop.
//!
//! The real windowing/input stack lives outside this core; the loop only
//! polls for the close signal, swaps once per frame dispatch, and asks
//! whether the host already paces presentation.

/// The loop-facing surface of a window collaborator.
pub trait Window: Send {
    /// `true` once the user or host has requested shutdown. Polled between
    /// loop iterations only; closing mid-tick lets the current batch and
    /// frame complete.
    fn is_closed(&self) -> bool;

    /// Present the frame and poll host events. Invoked once per frame
    /// dispatch.
    fn swap(&mut self);

    /// Whether the host performs vertical sync. When it does not, the loop
    /// rate-limits rendering with a coarse sleep instead.
    fn is_vsync_enabled(&self) -> bool;
}

/// Window double for tests and headless runs: counts swaps and reports
/// closed once a frame budget is exhausted.
#[derive(Debug)]
pub struct HeadlessWindow {
    frame_budget: u64,
    frames: u64,
    vsync: bool,
}

impl HeadlessWindow {
    /// Create a headless window that closes after `frame_budget` swaps.
    #[must_use]
    pub fn new(frame_budget: u64) -> Self {
        Self {
            frame_budget,
            frames: 0,
            vsync: false,
        }
    }

    /// Override the reported vertical-sync flag.
    #[must_use]
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    /// Number of frames presented so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Window for HeadlessWindow {
    fn is_closed(&self) -> bool {
        self.frames >= self.frame_budget
    }

    fn swap(&mut self) {
        self.frames += 1;
    }

    fn is_vsync_enabled(&self) -> bool {
        self.vsync
    }
}
