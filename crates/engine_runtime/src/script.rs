//! The script capability consumed by the tick dispatcher.

use std::sync::Arc;

use engine_store::{Capability, CapabilityDeclarations, Component, ComponentStore, Entity};

/// Behaviour attached to an entity, invoked once per simulation tick with a
/// fixed `dt` in seconds.
///
/// Scripts receive mutable access to the store and may create entities
/// through [`ComponentStore::registry`], but must not invalidate the
/// in-flight iteration of the script capability set itself.
pub trait Script: Send + Sync {
    /// Run one tick of this script for `entity`.
    fn invoke(&self, entity: Entity, store: &mut ComponentStore, dt: f64);
}

/// The capability declared by every script-carrying kind.
///
/// The dispatcher queries and fetches through this one capability, so any
/// kind declaring it is invoked. It yields a shared handle rather than a
/// bare reference so the dispatcher can release its store borrow before
/// handing the store to the script mutably.
pub trait ScriptSource: Send + Sync {
    /// The script to run for the holding entity this tick.
    fn script(&self) -> Arc<dyn Script>;
}

impl Capability for dyn ScriptSource {
    fn capability_name() -> &'static str {
        "Script"
    }
}

/// The stock script-carrying component kind: wraps any [`Script`] in a
/// shared handle and declares [`ScriptSource`] for it.
#[derive(Clone)]
pub struct ScriptHandle(Arc<dyn Script>);

impl ScriptHandle {
    /// Wrap a script for attachment to an entity.
    pub fn new(script: impl Script + 'static) -> Self {
        Self(Arc::new(script))
    }
}

impl ScriptSource for ScriptHandle {
    fn script(&self) -> Arc<dyn Script> {
        Arc::clone(&self.0)
    }
}

impl std::fmt::Debug for ScriptHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ScriptHandle").finish()
    }
}

impl Component for ScriptHandle {
    fn kind_name() -> &'static str {
        "ScriptHandle"
    }

    fn declare_capabilities(declarations: &mut CapabilityDeclarations<Self>) {
        declarations.implements::<dyn ScriptSource>(|handle| handle);
    }
}
