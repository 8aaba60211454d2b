//! Scene — the registry/store pair the loop operates on.

use std::sync::Arc;

use engine_store::{ComponentStore, EntityRegistry};

/// The entity registry and component store for one simulation, owned by the
/// engine for its lifetime. Callers hold identity values or transient
/// references, never the data itself.
#[derive(Debug)]
pub struct Scene {
    registry: Arc<EntityRegistry>,
    store: ComponentStore,
}

impl Scene {
    /// Create an empty scene with a fresh registry.
    #[must_use]
    pub fn new() -> Self {
        let registry = Arc::new(EntityRegistry::new());
        let store = ComponentStore::new(Arc::clone(&registry));
        Self { registry, store }
    }

    /// The registry that owns entity identity for this scene.
    #[must_use]
    pub fn registry(&self) -> &Arc<EntityRegistry> {
        &self.registry
    }

    /// Read access to the component store.
    #[must_use]
    pub fn store(&self) -> &ComponentStore {
        &self.store
    }

    /// Write access to the component store.
    pub fn store_mut(&mut self) -> &mut ComponentStore {
        &mut self.store
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
