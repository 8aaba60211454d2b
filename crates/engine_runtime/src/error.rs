//! Engine error types.

/// Fatal configuration errors raised before the loop enters its first
/// iteration. None of these are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The loop was started without an attached scene.
    #[error("no scene attached: attach a scene before calling run()")]
    MissingScene,

    /// The loop was started without an attached window.
    #[error("no window attached: attach a window before calling run()")]
    MissingWindow,

    /// A rate option was not a positive integer.
    #[error("invalid configuration: {0} must be a positive integer")]
    InvalidConfig(&'static str),
}
