//! # engine_components
//!
//! The stock component kinds the engine ships: spatial [`Transform`], mesh
//! geometry, and the [`Material`] capability with its [`Color`] and
//! [`Texture`] concrete kinds. Everything here is data-only and
//! serialisable so an external scene loader can persist it.

pub mod material;
pub mod mesh;
pub mod transform;

pub use material::{Color, Material, Texture};
pub use mesh::Mesh;
pub use transform::Transform;
