//! # engine_store
//!
//! Entity identity and the polymorphic component store — the data core of
//! the simulation engine.
//!
//! This crate provides:
//!
//! - [`Entity`] — opaque 128-bit entity identifiers.
//! - [`EntityRegistry`] — allocates and tracks live entities behind a
//!   coarse lock.
//! - [`Component`] / [`Capability`] — the contract for stored data and the
//!   abstract views queries are expressed in.
//! - [`ComponentStore`] — per-kind storage with polymorphic capability
//!   queries and a deterministic tie-break.

pub mod entity;
pub mod error;
pub mod kind;
pub mod store;

pub use entity::{Entity, EntityRegistry};
pub use error::StoreError;
pub use kind::{Capability, CapabilityDeclarations, CapabilityId, Component, KindId};
pub use store::ComponentStore;
