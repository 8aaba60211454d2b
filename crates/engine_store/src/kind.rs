//! Component kinds, capability tags, and the adjacency between them.
//!
//! Every value stored in the [`ComponentStore`](crate::ComponentStore) has a
//! concrete **kind**; queries are expressed in terms of abstract
//! **capabilities** that one or more kinds implement. Both are tagged with
//! stable 64-bit ids derived from their string name with the FNV-1a hash, so
//! the mapping never depends on compilation order or runtime reflection.
//!
//! The capability-to-kind adjacency is populated explicitly when a kind is
//! first registered: [`Component::declare_capabilities`] records, per
//! capability, a monomorphised caster that re-views a stored value as that
//! capability's trait object.

use std::any::Any;
use std::collections::HashMap;
use std::marker::PhantomData;

/// A unique identifier for a concrete component kind, derived from its
/// string name using the FNV-1a 64-bit hash algorithm.
///
/// The id is deterministic: the same name always produces the same tag, in
/// any build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KindId(pub u64);

impl KindId {
    /// FNV-1a 64-bit offset basis.
    const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

    /// FNV-1a 64-bit prime.
    const FNV_PRIME: u64 = 0x0100_0000_01b3;

    /// Compute the [`KindId`] for a kind's string name.
    #[must_use]
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        let mut hash = Self::FNV_OFFSET_BASIS;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u64;
            hash = hash.wrapping_mul(Self::FNV_PRIME);
            i += 1;
        }
        Self(hash)
    }

    /// Compute the [`KindId`] for a Rust component type `T`.
    #[must_use]
    pub fn of<T: Component>() -> Self {
        Self::from_name(T::kind_name())
    }
}

/// A unique identifier for a capability, in the same FNV-1a hash space as
/// [`KindId`]. A concrete kind's own id doubles as its trivial capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CapabilityId(pub u64);

impl CapabilityId {
    /// Compute the [`CapabilityId`] for a capability's string name.
    #[must_use]
    pub const fn from_name(name: &str) -> Self {
        Self(KindId::from_name(name).0)
    }

    /// Compute the [`CapabilityId`] for a capability type `C`.
    #[must_use]
    pub fn of<C: Capability + ?Sized>() -> Self {
        Self::from_name(C::capability_name())
    }
}

/// The core component trait.
///
/// Any data-only value attached to an entity must implement this trait.
/// Components must be `Send + Sync` so the store can be handed across
/// thread boundaries by its owner.
///
/// # Examples
///
/// ```rust
/// use engine_store::Component;
///
/// #[derive(Debug, Clone)]
/// struct Health {
///     current: f32,
///     max: f32,
/// }
///
/// impl Component for Health {
///     fn kind_name() -> &'static str { "Health" }
/// }
/// ```
pub trait Component: Send + Sync + 'static {
    /// A human-readable name for this concrete kind. Must be unique across
    /// all kinds and capabilities stored together.
    fn kind_name() -> &'static str;

    /// Returns the [`KindId`] for this kind.
    fn kind_id() -> KindId {
        KindId::from_name(Self::kind_name())
    }

    /// Declare the capabilities this kind implements, beyond its own kind.
    ///
    /// Called once, when the kind is first registered with a store. The
    /// default declares nothing.
    fn declare_capabilities(declarations: &mut CapabilityDeclarations<Self>)
    where
        Self: Sized,
    {
        let _ = declarations;
    }
}

/// An abstract capability that one or more concrete kinds implement.
///
/// Implemented for trait objects (`impl Capability for dyn Material`) and
/// blanket-implemented for every concrete [`Component`], so exact-kind and
/// polymorphic queries share one entry point.
pub trait Capability: 'static {
    /// The capability's stable string name.
    fn capability_name() -> &'static str;
}

impl<T: Component> Capability for T {
    fn capability_name() -> &'static str {
        T::kind_name()
    }
}

/// A stored component value with its concrete type erased.
pub(crate) type ErasedComponent = Box<dyn Any + Send + Sync>;

/// Re-views a stored erased component as a capability trait object.
///
/// Monomorphised per `(kind, capability)` pair at declaration time; stored
/// type-erased and recovered by downcasting to `Caster<Cap>`.
pub(crate) struct Caster<Cap: ?Sized + 'static>(
    #[allow(clippy::type_complexity)]
    pub(crate) Box<dyn for<'a> Fn(&'a (dyn Any + Send + Sync)) -> Option<&'a Cap> + Send + Sync>,
);

/// The capability declarations for one concrete kind, collected at
/// registration time.
pub struct CapabilityDeclarations<T: Component> {
    pub(crate) casters: HashMap<CapabilityId, Box<dyn Any + Send + Sync>>,
    _kind: PhantomData<fn() -> T>,
}

impl<T: Component> CapabilityDeclarations<T> {
    pub(crate) fn new() -> Self {
        Self {
            casters: HashMap::new(),
            _kind: PhantomData,
        }
    }

    /// Declare that `T` implements the capability `Cap`.
    ///
    /// `cast` re-views a component as the capability's trait object; at the
    /// call site an unsizing coercion makes `|c| c` sufficient:
    ///
    /// ```rust,ignore
    /// fn declare_capabilities(declarations: &mut CapabilityDeclarations<Self>) {
    ///     declarations.implements::<dyn Material>(|c| c);
    /// }
    /// ```
    pub fn implements<Cap: Capability + ?Sized>(&mut self, cast: fn(&T) -> &Cap) {
        let caster: Caster<Cap> = Caster(Box::new(move |erased| {
            erased.downcast_ref::<T>().map(cast)
        }));
        self.casters
            .insert(CapabilityId::of::<Cap>(), Box::new(caster));
    }
}
