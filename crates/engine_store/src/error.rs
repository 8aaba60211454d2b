//! Store error types.

use crate::entity::Entity;

/// Errors raised by store operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The operation referenced an entity identity that is not present in
    /// the registry. Always a caller defect (a stale identity), never a
    /// recoverable condition.
    #[error("unknown entity {0}: identity not present in the registry")]
    UnknownEntity(Entity),
}
