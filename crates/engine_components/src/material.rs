//! Surface materials: the abstract capability and its concrete kinds.
//!
//! A renderer asks for `dyn Material` and receives whichever concrete kind
//! the entity holds — a flat [`Color`] or a [`Texture`] reference.

use engine_store::{Capability, CapabilityDeclarations, Component};
use glam::Vec4;
use serde::{Deserialize, Serialize};

/// The lighting-facing surface description implemented by every concrete
/// material kind.
pub trait Material: Send + Sync {
    /// Ambient reflectivity, RGBA.
    fn ambient(&self) -> Vec4;

    /// Diffuse reflectivity, RGBA.
    fn diffuse(&self) -> Vec4;

    /// Specular reflectivity, RGBA.
    fn specular(&self) -> Vec4;

    /// Specular reflectance exponent.
    fn reflectance(&self) -> f32;

    /// Expand per-vertex RGBA colors for the given `xyz` vertex positions.
    fn colors_for_vertices(&self, vertices: &[f32]) -> Vec<f32>;
}

impl Capability for dyn Material {
    fn capability_name() -> &'static str {
        "Material"
    }
}

/// Flat-color material: one RGBA value for every vertex.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Color {
    /// The color, RGBA in `[0, 1]`.
    pub rgba: Vec4,
}

impl Color {
    /// A color from RGBA channels.
    #[must_use]
    pub fn new(rgba: Vec4) -> Self {
        Self { rgba }
    }

    /// An opaque color from RGB channels.
    #[must_use]
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self {
            rgba: Vec4::new(r, g, b, 1.0),
        }
    }
}

impl Material for Color {
    fn ambient(&self) -> Vec4 {
        self.rgba
    }

    fn diffuse(&self) -> Vec4 {
        self.rgba
    }

    fn specular(&self) -> Vec4 {
        self.rgba
    }

    fn reflectance(&self) -> f32 {
        0.0
    }

    fn colors_for_vertices(&self, vertices: &[f32]) -> Vec<f32> {
        let vertex_count = vertices.len() / 3;
        let mut colors = Vec::with_capacity(vertex_count * 4);
        for _ in 0..vertex_count {
            colors.extend_from_slice(&[self.rgba.x, self.rgba.y, self.rgba.z, self.rgba.w]);
        }
        colors
    }
}

impl Component for Color {
    fn kind_name() -> &'static str {
        "Color"
    }

    fn declare_capabilities(declarations: &mut CapabilityDeclarations<Self>) {
        declarations.implements::<dyn Material>(|color| color);
    }
}

/// Texture-mapped material: a sampler source plus per-vertex sample
/// coordinates in draw order. The image itself is loaded by the renderer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Texture {
    /// Path of the texture image, resolved by the asset loader.
    pub path: String,
    /// UV coordinates, two floats per vertex.
    pub coordinates: Vec<f32>,
}

impl Texture {
    /// A texture reference with its sample coordinates.
    #[must_use]
    pub fn new(path: impl Into<String>, coordinates: Vec<f32>) -> Self {
        Self {
            path: path.into(),
            coordinates,
        }
    }
}

impl Material for Texture {
    fn ambient(&self) -> Vec4 {
        Vec4::ONE
    }

    fn diffuse(&self) -> Vec4 {
        Vec4::ONE
    }

    fn specular(&self) -> Vec4 {
        Vec4::ONE
    }

    fn reflectance(&self) -> f32 {
        0.0
    }

    fn colors_for_vertices(&self, vertices: &[f32]) -> Vec<f32> {
        // Sampling supplies the color; vertices are tinted neutral white.
        Color::rgb(1.0, 1.0, 1.0).colors_for_vertices(vertices)
    }
}

impl Component for Texture {
    fn kind_name() -> &'static str {
        "Texture"
    }

    fn declare_capabilities(declarations: &mut CapabilityDeclarations<Self>) {
        declarations.implements::<dyn Material>(|texture| texture);
    }
}
