// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Contour extrusion - converting a planar point loop into a closed solid
//!
//! The contour is an implicitly closed loop (first point not repeated).
//! The extrusion plane normal is derived from the first three points, so
//! those must not be collinear.

use crate::error::{Error, Result};
use crate::solid::Solid;
use nalgebra::Point3;

/// How the thickness is applied relative to the contour plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtrudeMode {
    /// Extrude to one side of the contour plane; the sign of the thickness
    /// selects which side.
    Single,
    /// Double the thickness and re-center so the solid is balanced fore/aft
    /// of the contour plane. Used for cut tools that must fully pierce a
    /// host of unknown thickness.
    Symmetric,
}

/// Extrude a closed planar contour along its plane normal.
///
/// Produces front and back caps wound toward opposite half-spaces plus one
/// quad side face per contour edge. Side quads keep per-face normals (flat
/// shading); the final vertex-normal recompute smooths only vertices shared
/// within a cap. Planar UVs are projected before the final re-centering
/// translation.
pub fn extrude_contour(
    contour: &[Point3<f64>],
    thickness: f64,
    mode: ExtrudeMode,
) -> Result<Solid> {
    let n = contour.len();
    if n < 3 {
        return Err(Error::InvalidContour(format!(
            "Need at least 3 points, got {}",
            n
        )));
    }

    let v1 = contour[1] - contour[0];
    let v2 = contour[2] - contour[0];
    let mut normal = v1.cross(&v2).try_normalize(1e-10).ok_or_else(|| {
        Error::InvalidContour("First three points are collinear".to_string())
    })?;

    if thickness < 0.0 {
        normal = -normal;
    }

    let depth = match mode {
        ExtrudeMode::Single => thickness,
        ExtrudeMode::Symmetric => thickness * 2.0,
    };
    let offset = normal * depth;

    let cap_vertex_count = n * 2;
    let side_vertex_count = n * 4;
    let mut solid = Solid::with_capacity(
        cap_vertex_count + side_vertex_count,
        (n - 2) * 6 + n * 6,
    );

    // Front cap vertices (the original contour), then back cap vertices
    // advanced by the extrusion offset.
    for p in contour {
        solid.add_vertex(*p, normal);
    }
    for p in contour {
        solid.add_vertex(p + offset, normal);
    }

    // Cap fans. The front cap is wound opposite to the back cap so both
    // resolve to outward-facing normals after the recompute pass.
    for i in 1..(n - 1) as u32 {
        solid.add_triangle(0, i + 1, i);
    }
    let back = n as u32;
    for i in 1..(n - 1) as u32 {
        solid.add_triangle(back, back + i, back + i + 1);
    }

    // One quad per contour edge, with its own per-quad normal.
    for i in 0..n {
        let j = (i + 1) % n;

        let p0 = contour[i];
        let p1 = contour[j];
        let p2 = p1 + offset;
        let p3 = p0 + offset;

        let edge1 = p1 - p0;
        let edge2 = p3 - p0;
        let side_normal = match edge1.cross(&edge2).try_normalize(1e-10) {
            Some(sn) => sn,
            None => continue, // Skip degenerate edge (duplicate points in contour)
        };

        let idx = solid.vertex_count() as u32;
        solid.add_vertex(p0, side_normal);
        solid.add_vertex(p1, side_normal);
        solid.add_vertex(p2, side_normal);
        solid.add_vertex(p3, side_normal);

        solid.add_triangle(idx, idx + 1, idx + 2);
        solid.add_triangle(idx, idx + 2, idx + 3);
    }

    solid.recompute_vertex_normals();
    solid.generate_planar_uvs();

    // Sign selects the extrusion side: translate back so the solid stays on
    // the intended side of the contour plane.
    if thickness < 0.0 {
        solid.translate(normal * -depth);
    }

    // Re-center symmetric extrusions on the contour plane.
    if mode == ExtrudeMode::Symmetric {
        solid.translate(normal * (-depth / 2.0));
    }

    Ok(solid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 1.0),
        ]
    }

    #[test]
    fn test_extrude_square_counts() {
        let solid = extrude_contour(&unit_square(), 2.0, ExtrudeMode::Single).unwrap();

        // 2 cap fans of (n-2) triangles plus 2 triangles per side quad.
        let n = 4;
        assert_eq!(solid.triangle_count(), 2 * (n - 2) + 2 * n);
        assert_eq!(solid.uvs.len(), solid.vertex_count() * 2);
    }

    #[test]
    fn test_extrude_square_bounds() {
        // Square in the XZ plane: cross of (x)×(z edge vectors) points to -Y,
        // so the extrusion grows toward -Y for positive thickness.
        let solid = extrude_contour(&unit_square(), 2.0, ExtrudeMode::Single).unwrap();
        let (min, max) = solid.bounds();

        assert_relative_eq!(min.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(max.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(min.y, -2.0, epsilon = 1e-6);
        assert_relative_eq!(max.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_negative_thickness_mirrors() {
        let pos = extrude_contour(&unit_square(), 2.0, ExtrudeMode::Single).unwrap();
        let neg = extrude_contour(&unit_square(), -2.0, ExtrudeMode::Single).unwrap();

        let (pos_min, pos_max) = pos.bounds();
        let (neg_min, neg_max) = neg.bounds();

        // Mirror image across the contour plane (y = 0).
        assert_relative_eq!(pos_min.y, -neg_max.y, epsilon = 1e-6);
        assert_relative_eq!(pos_max.y, -neg_min.y, epsilon = 1e-6);
        assert_eq!(pos.triangle_count(), neg.triangle_count());
    }

    #[test]
    fn test_symmetric_is_centered() {
        let solid = extrude_contour(&unit_square(), 0.65, ExtrudeMode::Symmetric).unwrap();
        let (min, max) = solid.bounds();

        // Balanced fore/aft of the contour plane with doubled total depth.
        assert_relative_eq!(min.y, -0.65, epsilon = 1e-6);
        assert_relative_eq!(max.y, 0.65, epsilon = 1e-6);
        assert_relative_eq!((min.y + max.y) / 2.0, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_too_few_points() {
        let contour = vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)];
        assert!(matches!(
            extrude_contour(&contour, 1.0, ExtrudeMode::Single),
            Err(Error::InvalidContour(_))
        ));
    }

    #[test]
    fn test_collinear_start_is_rejected() {
        let contour = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 1.0),
        ];
        assert!(matches!(
            extrude_contour(&contour, 1.0, ExtrudeMode::Single),
            Err(Error::InvalidContour(_))
        ));
    }

    #[test]
    fn test_side_quads_stay_flat() {
        let solid = extrude_contour(&unit_square(), 1.0, ExtrudeMode::Single).unwrap();

        // Side vertices start after the two caps (2n vertices); each quad's
        // four vertices share one normal.
        let n = 4;
        for quad in 0..n {
            let base = 2 * n + quad * 4;
            let first: Vec<f32> = solid.normals[base * 3..base * 3 + 3].to_vec();
            for v in 1..4 {
                let i = (base + v) * 3;
                assert_eq!(&solid.normals[i..i + 3], first.as_slice());
            }
        }
    }
}
