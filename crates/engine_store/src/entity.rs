//! Entity identity and the registry that allocates it.
//!
//! An [`Entity`] is an opaque 128-bit identifier with no inherent data.
//! All entities are allocated by an [`EntityRegistry`], which is the single
//! source of truth for which identities are live.

use std::collections::HashSet;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unique entity identifier.
///
/// Entities are pure identifiers — they carry no data of their own.
/// Components are attached to entities to give them meaning. Equality is by
/// identity value, and the raw id is never exposed for external mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Entity(Uuid);

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Allocates and tracks live entities.
///
/// The registry uses a coarse lock around the live set so that a script
/// callback can create entities while the loop is iterating a query result.
/// The lock is held only for the duration of each individual call.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    live: Mutex<HashSet<Entity>>,
}

impl EntityRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            live: Mutex::new(HashSet::new()),
        }
    }

    /// Allocate and register a fresh entity.
    ///
    /// The returned entity is guaranteed never to collide with a live entity
    /// and is immediately visible to all subsequent store operations.
    pub fn create(&self) -> Entity {
        let entity = Entity(Uuid::new_v4());
        self.live.lock().insert(entity);
        entity
    }

    /// Returns `true` if the entity was allocated by this registry.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.live.lock().contains(&entity)
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live.lock().len()
    }

    /// Returns `true` if no entities have been created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.lock().is_empty()
    }
}
