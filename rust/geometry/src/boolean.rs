// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boolean solid operations
//!
//! Thin bridge to csgrs for mesh difference. Solids cross into BSP polygon
//! soup form, get clipped, and come back as indexed triangle buffers with
//! fresh planar UVs. Inputs are consumed: the caller hands over ownership and
//! receives a single result solid in exchange.

use crate::error::{Error, Result};
use crate::solid::Solid;
use crate::triangulation::{polygon_normal, triangulate_loop};
use nalgebra::{Point3, Vector3};

/// Stateless boolean operation engine.
pub struct BooleanEngine;

impl BooleanEngine {
    /// Subtract `tool` from `target` (target - tool).
    ///
    /// Both inputs are consumed. The result keeps the target's material and
    /// gets regenerated planar UVs; normals come from the clipped polygon
    /// planes. An empty tool is a no-op and returns the target unchanged.
    pub fn subtract(target: Solid, tool: Solid) -> Result<Solid> {
        use csgrs::traits::CSG;

        if target.is_empty() {
            return Err(Error::EmptySolid(
                "Subtraction target has no geometry".to_string(),
            ));
        }

        if tool.is_empty() {
            return Ok(target);
        }

        let material = target.material;

        let target_csg = Self::solid_to_csgrs(&target);
        let tool_csg = Self::solid_to_csgrs(&tool);

        let result_csg = target_csg.difference(&tool_csg);

        let mut result = Self::csgrs_to_solid(&result_csg)?;
        result.material = material;
        result.generate_planar_uvs();
        Ok(result)
    }

    /// Convert a solid to the csgrs polygon-soup form.
    fn solid_to_csgrs(solid: &Solid) -> csgrs::mesh::Mesh<()> {
        use csgrs::mesh::{polygon::Polygon, vertex::Vertex, Mesh as CSGMesh};
        use std::sync::OnceLock;

        if solid.is_empty() {
            return CSGMesh {
                polygons: Vec::new(),
                bounding_box: OnceLock::new(),
                metadata: None,
            };
        }

        let mut polygons = Vec::with_capacity(solid.triangle_count());

        for tri in solid.indices.chunks_exact(3) {
            let v0 = solid.position(tri[0] as usize);
            let v1 = solid.position(tri[1] as usize);
            let v2 = solid.position(tri[2] as usize);

            // Skip degenerate triangles to avoid NaN propagation in the BSP.
            let edge1 = v1 - v0;
            let edge2 = v2 - v0;
            let face_normal = match edge1.cross(&edge2).try_normalize(1e-10) {
                Some(n) => n,
                None => continue,
            };

            let vertices = vec![
                Vertex::new(v0, face_normal),
                Vertex::new(v1, face_normal),
                Vertex::new(v2, face_normal),
            ];

            polygons.push(Polygon::new(vertices, None));
        }

        CSGMesh::from_polygons(&polygons, None)
    }

    /// Convert a csgrs result back to an indexed triangle solid.
    fn csgrs_to_solid(csg_mesh: &csgrs::mesh::Mesh<()>) -> Result<Solid> {
        let mut solid = Solid::new();

        for polygon in &csg_mesh.polygons {
            let vertices = &polygon.vertices;
            if vertices.len() < 3 {
                continue;
            }

            let points_3d: Vec<Point3<f64>> = vertices
                .iter()
                .map(|v| Point3::new(v.pos[0], v.pos[1], v.pos[2]))
                .collect();

            // Prefer the clip plane's normal (preserves winding intent); fall
            // back to a computed normal when the stored one is degenerate.
            let raw_normal = Vector3::new(
                vertices[0].normal[0],
                vertices[0].normal[1],
                vertices[0].normal[2],
            );
            let plane_normal = match raw_normal.try_normalize(1e-10) {
                Some(n) if n.x.is_finite() && n.y.is_finite() && n.z.is_finite() => n,
                _ => match polygon_normal(&points_3d) {
                    Some(n) => n,
                    None => continue,
                },
            };

            // Fast path: triangle needs no triangulation.
            if points_3d.len() == 3 {
                let base = solid.vertex_count() as u32;
                for v in vertices {
                    solid.add_vertex(
                        Point3::new(v.pos[0], v.pos[1], v.pos[2]),
                        Vector3::new(v.normal[0], v.normal[1], v.normal[2]),
                    );
                }
                solid.add_triangle(base, base + 1, base + 2);
                continue;
            }

            let triangles = match triangulate_loop(&points_3d, &plane_normal) {
                Ok(t) => t,
                Err(_) => continue, // Skip degenerate polygons
            };

            let base = solid.vertex_count();
            for v in vertices {
                solid.add_vertex(
                    Point3::new(v.pos[0], v.pos[1], v.pos[2]),
                    Vector3::new(v.normal[0], v.normal[1], v.normal[2]),
                );
            }

            for [a, b, c] in triangles {
                solid.add_triangle((base + a) as u32, (base + b) as u32, (base + c) as u32);
            }
        }

        Ok(solid)
    }
}

/// Build an axis-aligned box solid from min/max bounds.
/// Returns 12 triangles (2 per face), wound counter-clockwise from outside.
pub fn aabb_to_solid(min: Point3<f64>, max: Point3<f64>) -> Solid {
    let mut solid = Solid::with_capacity(36, 36);

    let v0 = Point3::new(min.x, min.y, min.z);
    let v1 = Point3::new(max.x, min.y, min.z);
    let v2 = Point3::new(max.x, max.y, min.z);
    let v3 = Point3::new(min.x, max.y, min.z);
    let v4 = Point3::new(min.x, min.y, max.z);
    let v5 = Point3::new(max.x, min.y, max.z);
    let v6 = Point3::new(max.x, max.y, max.z);
    let v7 = Point3::new(min.x, max.y, max.z);

    // Front face (z = min.z), normal toward -Z
    add_triangle(&mut solid, v0, v2, v1);
    add_triangle(&mut solid, v0, v3, v2);

    // Back face (z = max.z), normal toward +Z
    add_triangle(&mut solid, v4, v5, v6);
    add_triangle(&mut solid, v4, v6, v7);

    // Left face (x = min.x), normal toward -X
    add_triangle(&mut solid, v0, v4, v7);
    add_triangle(&mut solid, v0, v7, v3);

    // Right face (x = max.x), normal toward +X
    add_triangle(&mut solid, v1, v2, v6);
    add_triangle(&mut solid, v1, v6, v5);

    // Bottom face (y = min.y), normal toward -Y
    add_triangle(&mut solid, v0, v1, v5);
    add_triangle(&mut solid, v0, v5, v4);

    // Top face (y = max.y), normal toward +Y
    add_triangle(&mut solid, v3, v7, v6);
    add_triangle(&mut solid, v3, v6, v2);

    solid.generate_planar_uvs();
    solid
}

fn add_triangle(solid: &mut Solid, v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let normal = match edge1.cross(&edge2).try_normalize(1e-10) {
        Some(n) => n,
        None => return,
    };

    let base = solid.vertex_count() as u32;
    solid.add_vertex(v0, normal);
    solid.add_vertex(v1, normal);
    solid.add_vertex(v2, normal);
    solid.add_triangle(base, base + 1, base + 2);
}
