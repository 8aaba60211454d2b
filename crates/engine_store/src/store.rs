//! The polymorphic component store.
//!
//! Storage is partitioned by concrete kind — one entity-to-value map per
//! [`KindId`] — while queries are expressed in terms of capabilities. A
//! capability lookup first tries the exact kind, then scans the registered
//! kinds for one that declares the capability and holds an entry for the
//! entity. The scan walks kinds in reverse registration order, so when
//! several kinds satisfy a capability for the same entity the most recently
//! registered kind wins, deterministically.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::entity::{Entity, EntityRegistry};
use crate::error::StoreError;
use crate::kind::{
    Capability, CapabilityDeclarations, CapabilityId, Caster, Component, ErasedComponent, KindId,
};

/// Per-kind storage: the kind's metadata plus its entity-to-value map.
struct KindStorage {
    /// Human-readable kind name, for diagnostics.
    name: &'static str,
    /// Capability casters declared at registration, keyed by capability id.
    /// Always contains the kind's own trivial capability.
    casters: HashMap<CapabilityId, Box<dyn std::any::Any + Send + Sync>>,
    /// The stored values. At most one entry per entity.
    entries: HashMap<Entity, ErasedComponent>,
}

impl KindStorage {
    /// Returns `true` if this kind declares the given capability.
    fn provides(&self, capability: CapabilityId) -> bool {
        self.casters.contains_key(&capability)
    }

    /// Look up the entity's value and re-view it as `Cap`, if this kind
    /// declares that capability.
    fn view<Cap: Capability + ?Sized>(&self, entity: Entity) -> Option<&Cap> {
        let caster = self
            .casters
            .get(&CapabilityId::of::<Cap>())?
            .downcast_ref::<Caster<Cap>>()?;
        let erased = self.entries.get(&entity)?;
        (caster.0)(erased.as_ref())
    }
}

impl std::fmt::Debug for KindStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KindStorage")
            .field("name", &self.name)
            .field("capabilities", &self.casters.len())
            .field("entries", &self.entries.len())
            .finish()
    }
}

/// Stores, replaces, and polymorphically queries per-entity component data.
///
/// The store holds a handle to the [`EntityRegistry`] it validates against;
/// every operation on an identity the registry does not know fails with
/// [`StoreError::UnknownEntity`]. "Entity exists but lacks this capability"
/// is a normal outcome (`Ok(None)`), distinct from the error.
#[derive(Debug)]
pub struct ComponentStore {
    /// The registry that owns entity identity.
    registry: Arc<EntityRegistry>,
    /// One storage partition per registered concrete kind.
    kinds: HashMap<KindId, KindStorage>,
    /// Kind ids in registration order; polymorphic scans walk it newest
    /// first so capability tie-breaks are deterministic.
    registration_order: Vec<KindId>,
}

impl ComponentStore {
    /// Create an empty store validating against the given registry.
    #[must_use]
    pub fn new(registry: Arc<EntityRegistry>) -> Self {
        Self {
            registry,
            kinds: HashMap::new(),
            registration_order: Vec::new(),
        }
    }

    /// Returns the registry this store validates against.
    ///
    /// Script callbacks can create entities through this handle while the
    /// loop is iterating a query result.
    #[must_use]
    pub fn registry(&self) -> &Arc<EntityRegistry> {
        &self.registry
    }

    /// Returns the number of registered concrete kinds.
    #[must_use]
    pub fn kind_count(&self) -> usize {
        self.kinds.len()
    }

    /// Attach a component to an entity, replacing any existing component of
    /// the same concrete kind.
    ///
    /// # Errors
    ///
    /// [`StoreError::UnknownEntity`] if the entity is not in the registry.
    pub fn put<T: Component>(&mut self, entity: Entity, component: T) -> Result<(), StoreError> {
        if !self.registry.contains(entity) {
            return Err(StoreError::UnknownEntity(entity));
        }

        let id = T::kind_id();
        let storage = match self.kinds.entry(id) {
            Entry::Occupied(occupied) => occupied.into_mut(),
            Entry::Vacant(vacant) => {
                let mut declarations = CapabilityDeclarations::<T>::new();
                // Every kind trivially provides itself.
                declarations.implements::<T>(|component| component);
                T::declare_capabilities(&mut declarations);

                self.registration_order.push(id);
                vacant.insert(KindStorage {
                    name: T::kind_name(),
                    casters: declarations.casters,
                    entries: HashMap::new(),
                })
            }
        };

        storage.entries.insert(entity, Box::new(component));
        Ok(())
    }

    /// Look up a component on an entity by capability.
    ///
    /// Tries an exact-kind lookup first; if the capability is not itself a
    /// registered kind, scans the registered kinds newest-first for one that
    /// declares the capability and holds an entry for the entity.
    ///
    /// Returns `Ok(None)` when the entity exists but holds no matching
    /// component.
    ///
    /// # Errors
    ///
    /// [`StoreError::UnknownEntity`] if the entity is not in the registry.
    pub fn get<Cap: Capability + ?Sized>(
        &self,
        entity: Entity,
    ) -> Result<Option<&Cap>, StoreError> {
        if !self.registry.contains(entity) {
            return Err(StoreError::UnknownEntity(entity));
        }

        let capability = CapabilityId::of::<Cap>();

        // Exact kind fast path.
        if let Some(storage) = self.kinds.get(&KindId(capability.0))
            && let Some(component) = storage.view::<Cap>(entity)
        {
            return Ok(Some(component));
        }

        // Polymorphic scan, most recently registered kind first.
        for kind_id in self.registration_order.iter().rev() {
            if let Some(storage) = self.kinds.get(kind_id)
                && let Some(component) = storage.view::<Cap>(entity)
            {
                return Ok(Some(component));
            }
        }

        Ok(None)
    }

    /// Returns `true` if the entity holds any component satisfying `Cap`.
    ///
    /// # Errors
    ///
    /// [`StoreError::UnknownEntity`] if the entity is not in the registry.
    pub fn has<Cap: Capability + ?Sized>(&self, entity: Entity) -> Result<bool, StoreError> {
        Ok(self.get::<Cap>(entity)?.is_some())
    }

    /// Returns every entity holding a component whose kind is `Cap` or
    /// declares `Cap` — the union over all matching kind partitions.
    #[must_use]
    pub fn entities_with<Cap: Capability + ?Sized>(&self) -> HashSet<Entity> {
        let capability = CapabilityId::of::<Cap>();
        let mut entities = HashSet::new();
        for storage in self.kinds.values() {
            if storage.provides(capability) {
                entities.extend(storage.entries.keys().copied());
            }
        }
        entities
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Position {
        x: f32,
        y: f32,
    }

    impl Component for Position {
        fn kind_name() -> &'static str {
            "Position"
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Velocity {
        dx: f32,
        dy: f32,
    }

    impl Component for Velocity {
        fn kind_name() -> &'static str {
            "Velocity"
        }
    }

    trait Shape: Send + Sync {
        fn shape_name(&self) -> &'static str;
    }

    impl Capability for dyn Shape {
        fn capability_name() -> &'static str {
            "Shape"
        }
    }

    struct Circle;

    impl Shape for Circle {
        fn shape_name(&self) -> &'static str {
            "circle"
        }
    }

    impl Component for Circle {
        fn kind_name() -> &'static str {
            "Circle"
        }

        fn declare_capabilities(declarations: &mut CapabilityDeclarations<Self>) {
            declarations.implements::<dyn Shape>(|c| c);
        }
    }

    struct Square;

    impl Shape for Square {
        fn shape_name(&self) -> &'static str {
            "square"
        }
    }

    impl Component for Square {
        fn kind_name() -> &'static str {
            "Square"
        }

        fn declare_capabilities(declarations: &mut CapabilityDeclarations<Self>) {
            declarations.implements::<dyn Shape>(|c| c);
        }
    }

    fn store() -> ComponentStore {
        ComponentStore::new(Arc::new(EntityRegistry::new()))
    }

    #[test]
    fn test_put_then_get_roundtrip() {
        let mut store = store();
        let entity = store.registry().create();
        store.put(entity, Position { x: 1.0, y: 2.0 }).unwrap();

        let position = store.get::<Position>(entity).unwrap().unwrap();
        assert_eq!(*position, Position { x: 1.0, y: 2.0 });
    }

    #[test]
    fn test_put_replaces_same_kind() {
        let mut store = store();
        let entity = store.registry().create();
        store.put(entity, Position { x: 1.0, y: 2.0 }).unwrap();
        store.put(entity, Position { x: 9.0, y: 9.0 }).unwrap();

        let position = store.get::<Position>(entity).unwrap().unwrap();
        assert_eq!(*position, Position { x: 9.0, y: 9.0 });
        assert_eq!(store.entities_with::<Position>().len(), 1);
    }

    #[test]
    fn test_missing_capability_is_none_not_error() {
        let mut store = store();
        let entity = store.registry().create();
        store.put(entity, Position { x: 0.0, y: 0.0 }).unwrap();

        assert_eq!(store.get::<Velocity>(entity).unwrap(), None);
        assert!(!store.has::<dyn Shape>(entity).unwrap());
    }

    #[test]
    fn test_unknown_entity_put_fails() {
        let mut store = store();
        let stale = EntityRegistry::new().create();
        let err = store.put(stale, Position { x: 0.0, y: 0.0 }).unwrap_err();
        assert_eq!(err, StoreError::UnknownEntity(stale));
    }

    #[test]
    fn test_unknown_entity_get_fails() {
        let store = store();
        let stale = EntityRegistry::new().create();
        let err = store.get::<Position>(stale).unwrap_err();
        assert_eq!(err, StoreError::UnknownEntity(stale));
    }

    #[test]
    fn test_polymorphic_get_through_capability() {
        let mut store = store();
        let entity = store.registry().create();
        store.put(entity, Circle).unwrap();

        let shape = store.get::<dyn Shape>(entity).unwrap().unwrap();
        assert_eq!(shape.shape_name(), "circle");
    }

    #[test]
    fn test_entities_with_unions_all_matching_kinds() {
        let mut store = store();
        let a = store.registry().create();
        let b = store.registry().create();
        let c = store.registry().create();
        store.put(a, Circle).unwrap();
        store.put(b, Square).unwrap();
        store.put(c, Position { x: 0.0, y: 0.0 }).unwrap();

        let shapes = store.entities_with::<dyn Shape>();
        assert_eq!(shapes, HashSet::from([a, b]));
        assert_eq!(store.entities_with::<Position>(), HashSet::from([c]));
        assert!(store.entities_with::<Velocity>().is_empty());
    }

    #[test]
    fn test_capability_tie_break_is_most_recently_registered_kind() {
        let mut store = store();
        let entity = store.registry().create();
        // Circle registers the "Circle" kind first, Square second.
        store.put(entity, Circle).unwrap();
        store.put(entity, Square).unwrap();

        let shape = store.get::<dyn Shape>(entity).unwrap().unwrap();
        assert_eq!(shape.shape_name(), "square");
    }

    #[test]
    fn test_reentrant_create_during_iteration() {
        let mut store = store();
        let seed = store.registry().create();
        store.put(seed, Position { x: 0.0, y: 0.0 }).unwrap();

        // Simulates a script callback spawning entities while walking a
        // query result.
        for _ in store.entities_with::<Position>() {
            let spawned = store.registry().create();
            store.put(spawned, Position { x: 1.0, y: 1.0 }).unwrap();
        }

        assert_eq!(store.entities_with::<Position>().len(), 2);
    }

    #[test]
    fn test_kind_count_tracks_registrations() {
        let mut store = store();
        let entity = store.registry().create();
        assert_eq!(store.kind_count(), 0);
        store.put(entity, Position { x: 0.0, y: 0.0 }).unwrap();
        store.put(entity, Velocity { dx: 0.0, dy: 0.0 }).unwrap();
        store.put(entity, Position { x: 1.0, y: 1.0 }).unwrap();
        assert_eq!(store.kind_count(), 2);
    }
}
