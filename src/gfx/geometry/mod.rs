//! # Procedural Geometry Generation
//!
//! This module provides functions to generate every shape the clock needs
//! procedurally, so the crate ships without any model files.
//!
//! ## Supported Shapes
//!
//! - **Plane**: Flat plane with configurable size and subdivisions
//! - **Cylinder**: Capped cylinder along Z (dial backface, pivot peg)
//! - **Box**: Axis-aligned box (hour markings)
//! - **Extrusions**: 2D outlines swept along Z (hands, frame ring)
//! - **Lines**: Wireframe cone and frustum for debug helpers
//!
//! ## Usage
//!
//! ```rust
//! use haggis_clock::gfx::geometry::{extrude_polygon, generate_box, ExtrudeSettings};
//!
//! // A 1x1 square extruded to a 0.2 thick slab
//! let slab = extrude_polygon(
//!     &[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
//!     &ExtrudeSettings { depth: 0.2, steps: 1 },
//! );
//! assert_eq!(slab.triangle_count(), 12);
//!
//! let marking = generate_box(0.5, 0.1, 0.04);
//! assert_eq!(marking.vertex_count(), 24);
//! ```

pub mod extrude;
pub mod lines;
pub mod primitives;

pub use extrude::*;
pub use lines::*;
pub use primitives::*;

use crate::gfx::scene::vertex::Vertex3D;

/// How the index list of a [`GeometryData`] is to be assembled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// Every three indices form a counter-clockwise triangle
    Triangles,
    /// Every two indices form a line segment
    Lines,
}

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Primitive indices
    pub indices: Vec<u32>,
    pub topology: Topology,
}

impl GeometryData {
    /// Create a new empty triangle geometry
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
            topology: Topology::Triangles,
        }
    }

    /// Create a new empty line geometry
    pub fn lines() -> Self {
        Self {
            topology: Topology::Lines,
            ..Self::new()
        }
    }

    /// Appends a vertex and returns its index
    pub fn push_vertex(&mut self, position: [f32; 3], normal: [f32; 3]) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        self.normals.push(normal);
        index
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry (zero for line geometry)
    pub fn triangle_count(&self) -> usize {
        match self.topology {
            Topology::Triangles => self.indices.len() / 3,
            Topology::Lines => 0,
        }
    }

    /// Axis-aligned bounds as (min, max); `None` for empty geometry
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        let first = *self.vertices.first()?;
        Some(self.vertices.iter().fold((first, first), |(mut min, mut max), v| {
            for axis in 0..3 {
                min[axis] = min[axis].min(v[axis]);
                max[axis] = max[axis].max(v[axis]);
            }
            (min, max)
        }))
    }

    /// Convert to the vertex format used by the renderer
    pub fn to_scene_format(&self) -> (Vec<Vertex3D>, Vec<u32>) {
        let vertices = self
            .vertices
            .iter()
            .enumerate()
            .map(|(i, position)| Vertex3D {
                position: *position,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 0.0, 1.0]),
            })
            .collect();

        (vertices, self.indices.clone())
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}
