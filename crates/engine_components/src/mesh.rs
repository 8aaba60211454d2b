//! Mesh geometry component.

use engine_store::Component;
use serde::{Deserialize, Serialize};

/// Triangle geometry: flat `xyz` vertex positions, per-vertex normals, and
/// an element index list in draw order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Mesh {
    /// Vertex positions, three floats per vertex.
    pub vertices: Vec<f32>,
    /// Per-vertex normals, parallel to `vertices`.
    pub normals: Vec<f32>,
    /// Triangle indices into the vertex list.
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a mesh from raw buffers.
    #[must_use]
    pub fn new(vertices: Vec<f32>, normals: Vec<f32>, indices: Vec<u32>) -> Self {
        Self {
            vertices,
            normals,
            indices,
        }
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// An axis-aligned cube of side 1 centred on the origin, 8 vertices and
    /// 12 triangles.
    #[must_use]
    pub fn unit_cube() -> Self {
        #[rustfmt::skip]
        let vertices = vec![
            -0.5, -0.5, -0.5,
             0.5, -0.5, -0.5,
             0.5,  0.5, -0.5,
            -0.5,  0.5, -0.5,
            -0.5, -0.5,  0.5,
             0.5, -0.5,  0.5,
             0.5,  0.5,  0.5,
            -0.5,  0.5,  0.5,
        ];
        // Corner normals; a lit renderer would re-expand to per-face data.
        let normals = vertices.clone();
        #[rustfmt::skip]
        let indices = vec![
            0, 1, 2, 2, 3, 0, // back
            4, 6, 5, 6, 4, 7, // front
            4, 0, 3, 3, 7, 4, // left
            1, 5, 6, 6, 2, 1, // right
            3, 2, 6, 6, 7, 3, // top
            4, 5, 1, 1, 0, 4, // bottom
        ];
        Self::new(vertices, normals, indices)
    }

    /// A unit quad in the XY plane centred on the origin.
    #[must_use]
    pub fn unit_plane() -> Self {
        #[rustfmt::skip]
        let vertices = vec![
            -0.5, -0.5, 0.0,
             0.5, -0.5, 0.0,
             0.5,  0.5, 0.0,
            -0.5,  0.5, 0.0,
        ];
        #[rustfmt::skip]
        let normals = vec![
            0.0, 0.0, 1.0,
            0.0, 0.0, 1.0,
            0.0, 0.0, 1.0,
            0.0, 0.0, 1.0,
        ];
        let indices = vec![0, 1, 2, 2, 3, 0];
        Self::new(vertices, normals, indices)
    }
}

impl Component for Mesh {
    fn kind_name() -> &'static str {
        "Mesh"
    }
}
