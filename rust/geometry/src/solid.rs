// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Solid data structures
//!
//! A [`Solid`] is a triangulated geometry buffer plus its appearance data.
//! Geometry is computed in f64 and stored in f32, the way GPU-facing buffers
//! expect it. A solid has exactly one owner at a time; boolean operations
//! produce a new solid and the caller releases the inputs it replaces.

use nalgebra::{Point3, Vector3};

/// Appearance of a solid: flat RGB color plus opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Packed 0xRRGGBB color.
    pub color: u32,
    pub opacity: f32,
}

impl Material {
    pub const fn opaque(color: u32) -> Self {
        Self {
            color,
            opacity: 1.0,
        }
    }

    pub const fn translucent(color: u32, opacity: f32) -> Self {
        Self { color, opacity }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::opaque(0xcccccc)
    }
}

/// Triangulated solid geometry with appearance data.
#[derive(Debug, Clone)]
pub struct Solid {
    /// Vertex positions (x, y, z)
    pub positions: Vec<f32>,
    /// Vertex normals (nx, ny, nz)
    pub normals: Vec<f32>,
    /// Planar texture coordinates (u, v)
    pub uvs: Vec<f32>,
    /// Triangle indices (i0, i1, i2)
    pub indices: Vec<u32>,
    pub material: Material,
}

impl Solid {
    /// Create a new empty solid with the default material.
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
            indices: Vec::new(),
            material: Material::default(),
        }
    }

    /// Create a solid with pre-allocated buffers.
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count * 3),
            normals: Vec::with_capacity(vertex_count * 3),
            uvs: Vec::with_capacity(vertex_count * 2),
            indices: Vec::with_capacity(index_count),
            material: Material::default(),
        }
    }

    /// Assign a material, builder-style.
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Add a vertex with normal. The UV channel is filled by
    /// [`Solid::generate_planar_uvs`] once all vertices exist.
    #[inline]
    pub fn add_vertex(&mut self, position: Point3<f64>, normal: Vector3<f64>) {
        self.positions.push(position.x as f32);
        self.positions.push(position.y as f32);
        self.positions.push(position.z as f32);

        self.normals.push(normal.x as f32);
        self.normals.push(normal.y as f32);
        self.normals.push(normal.z as f32);
    }

    /// Add a triangle
    #[inline]
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.push(i0);
        self.indices.push(i1);
        self.indices.push(i2);
    }

    /// Position of vertex `i` in f64 for computation.
    #[inline]
    pub fn position(&self, i: usize) -> Point3<f64> {
        Point3::new(
            self.positions[i * 3] as f64,
            self.positions[i * 3 + 1] as f64,
            self.positions[i * 3 + 2] as f64,
        )
    }

    /// Merge another solid's buffers into this one (keeps this material).
    #[inline]
    pub fn merge(&mut self, other: &Solid) {
        if other.is_empty() {
            return;
        }

        let vertex_offset = (self.positions.len() / 3) as u32;

        self.positions.reserve(other.positions.len());
        self.normals.reserve(other.normals.len());
        self.uvs.reserve(other.uvs.len());
        self.indices.reserve(other.indices.len());

        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);

        self.indices
            .extend(other.indices.iter().map(|&i| i + vertex_offset));
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get triangle count
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if the solid has no geometry
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() || self.indices.is_empty()
    }

    /// Calculate bounds (min, max) in f64.
    #[inline]
    pub fn bounds(&self) -> (Point3<f64>, Point3<f64>) {
        if self.positions.is_empty() {
            return (Point3::origin(), Point3::origin());
        }

        let mut min = Point3::new(f64::MAX, f64::MAX, f64::MAX);
        let mut max = Point3::new(f64::MIN, f64::MIN, f64::MIN);

        self.positions.chunks_exact(3).for_each(|chunk| {
            let (x, y, z) = (chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
            min.x = min.x.min(x);
            min.y = min.y.min(y);
            min.z = min.z.min(z);
            max.x = max.x.max(x);
            max.y = max.y.max(y);
            max.z = max.z.max(z);
        });

        (min, max)
    }

    /// Translate all positions in place.
    #[inline]
    pub fn translate(&mut self, offset: Vector3<f64>) {
        self.positions.chunks_exact_mut(3).for_each(|chunk| {
            chunk[0] = (chunk[0] as f64 + offset.x) as f32;
            chunk[1] = (chunk[1] as f64 + offset.y) as f32;
            chunk[2] = (chunk[2] as f64 + offset.z) as f32;
        });
    }

    /// Recompute smooth vertex normals by accumulating area-weighted face
    /// normals. Vertices not shared between faces keep flat shading.
    #[inline]
    pub fn recompute_vertex_normals(&mut self) {
        let vertex_count = self.vertex_count();
        if vertex_count == 0 {
            return;
        }

        let mut normals = vec![Vector3::<f64>::zeros(); vertex_count];

        for tri in self.indices.chunks_exact(3) {
            let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);

            let v0 = self.position(i0);
            let v1 = self.position(i1);
            let v2 = self.position(i2);

            let normal = (v1 - v0).cross(&(v2 - v0));

            normals[i0] += normal;
            normals[i1] += normal;
            normals[i2] += normal;
        }

        self.normals.clear();
        self.normals.reserve(vertex_count * 3);

        for normal in normals {
            let n = normal.try_normalize(1e-12).unwrap_or_else(Vector3::zeros);
            self.normals.push(n.x as f32);
            self.normals.push(n.y as f32);
            self.normals.push(n.z as f32);
        }
    }

    /// Generate planar UVs by projecting each vertex onto the horizontal
    /// plane: u = (x+1)/2, v = (z+1)/2. Non-seamless at the extrusion seam,
    /// which is acceptable for the flat architectural materials used here.
    #[inline]
    pub fn generate_planar_uvs(&mut self) {
        let vertex_count = self.vertex_count();
        self.uvs.clear();
        self.uvs.reserve(vertex_count * 2);

        for chunk in self.positions.chunks_exact(3) {
            let x = chunk[0];
            let z = chunk[2];
            self.uvs.push((x + 1.0) / 2.0);
            self.uvs.push((z + 1.0) / 2.0);
        }
    }
}

impl Default for Solid {
    fn default() -> Self {
        Self::new()
    }
}
