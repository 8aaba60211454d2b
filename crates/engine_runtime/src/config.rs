//! Engine configuration.

use crate::error::EngineError;

/// Rate configuration for the engine loop.
///
/// All fields are positive integers; [`EngineConfig::validate`] rejects
/// zeros before the loop starts.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Target simulation ticks per second. Each tick runs with a fixed
    /// `dt = 1 / max_updates_per_second`.
    pub max_updates_per_second: u32,
    /// Target render frames per second.
    pub max_frames_per_second: u32,
    /// Catch-up cap: the most ticks dispatched within a single loop
    /// iteration. Excess accumulated time is carried to later iterations.
    pub max_updates_per_frame: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_updates_per_second: 60,
            max_frames_per_second: 60,
            max_updates_per_frame: 500,
        }
    }
}

impl EngineConfig {
    /// Check that every rate is a positive integer.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.max_updates_per_second == 0 {
            return Err(EngineError::InvalidConfig("max_updates_per_second"));
        }
        if self.max_frames_per_second == 0 {
            return Err(EngineError::InvalidConfig("max_frames_per_second"));
        }
        if self.max_updates_per_frame == 0 {
            return Err(EngineError::InvalidConfig("max_updates_per_frame"));
        }
        Ok(())
    }
}
