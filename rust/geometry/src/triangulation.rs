// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar loop triangulation for boolean output.
//!
//! csgrs hands back arbitrary planar n-gons after clipping. Each loop is
//! flattened into its own plane and triangulated there: triangles and quads
//! split directly, small convex loops fan out, everything else goes through
//! earcutr.

use crate::error::{Error, Result};
use nalgebra::{Point2, Point3, Vector3};

/// Polygon normal by Newell's method. `None` when the loop is degenerate
/// (fewer than 3 points, or collinear/coincident throughout).
pub fn polygon_normal(points: &[Point3<f64>]) -> Option<Vector3<f64>> {
    if points.len() < 3 {
        return None;
    }

    let mut normal = Vector3::zeros();
    for (i, current) in points.iter().enumerate() {
        let next = &points[(i + 1) % points.len()];
        normal.x += (current.y - next.y) * (current.z + next.z);
        normal.y += (current.z - next.z) * (current.x + next.x);
        normal.z += (current.x - next.x) * (current.y + next.y);
    }

    normal.try_normalize(1e-10)
}

/// Two in-plane axes orthogonal to `normal`, seeded from the world axis
/// least aligned with it.
fn plane_basis(normal: &Vector3<f64>) -> (Vector3<f64>, Vector3<f64>) {
    let (ax, ay, az) = (normal.x.abs(), normal.y.abs(), normal.z.abs());
    let seed = if ax <= ay && ax <= az {
        Vector3::x()
    } else if ay <= az {
        Vector3::y()
    } else {
        Vector3::z()
    };

    let u = normal.cross(&seed).normalize();
    let v = normal.cross(&u).normalize();
    (u, v)
}

/// True when every turn of the loop bends the same way.
fn is_convex_loop(points: &[Point2<f64>]) -> bool {
    let n = points.len();
    let mut sign = 0.0f64;

    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let c = points[(i + 2) % n];

        let turn = (b - a).perp(&(c - b));
        if turn.abs() <= 1e-10 {
            continue;
        }
        if sign == 0.0 {
            sign = turn.signum();
        } else if sign != turn.signum() {
            return false;
        }
    }

    true
}

/// Triangulate one planar loop, given its plane normal.
/// Returns triangles as index triples into `points`.
pub fn triangulate_loop(
    points: &[Point3<f64>],
    normal: &Vector3<f64>,
) -> Result<Vec<[usize; 3]>> {
    let n = points.len();
    if n < 3 {
        return Err(Error::TriangulationError(format!(
            "loop of {} points cannot be triangulated",
            n
        )));
    }
    if n == 3 {
        return Ok(vec![[0, 1, 2]]);
    }

    let (u, v) = plane_basis(normal);
    let origin = points[0];
    let flat: Vec<Point2<f64>> = points
        .iter()
        .map(|p| {
            let d = p - origin;
            Point2::new(d.dot(&u), d.dot(&v))
        })
        .collect();

    if n == 4 || (n <= 8 && is_convex_loop(&flat)) {
        return Ok((1..n - 1).map(|i| [0, i, i + 1]).collect());
    }

    let mut coords = Vec::with_capacity(n * 2);
    for p in &flat {
        coords.push(p.x);
        coords.push(p.y);
    }

    let raw = earcutr::earcut(&coords, &[], 2)
        .map_err(|e| Error::TriangulationError(format!("{:?}", e)))?;

    Ok(raw.chunks_exact(3).map(|t| [t[0], t[1], t[2]]).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_splits_into_two_triangles() {
        let square = vec![
            Point3::new(0.0, 0.0, 2.0),
            Point3::new(1.0, 0.0, 2.0),
            Point3::new(1.0, 1.0, 2.0),
            Point3::new(0.0, 1.0, 2.0),
        ];

        let triangles = triangulate_loop(&square, &Vector3::z()).unwrap();
        assert_eq!(triangles, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn convex_hexagon_fans_out() {
        let hexagon: Vec<Point3<f64>> = (0..6)
            .map(|i| {
                let angle = (i as f64) * std::f64::consts::TAU / 6.0;
                Point3::new(angle.cos(), angle.sin(), 0.0)
            })
            .collect();

        let triangles = triangulate_loop(&hexagon, &Vector3::z()).unwrap();
        assert_eq!(triangles.len(), 4);
        assert!(triangles.iter().all(|t| t[0] == 0));
    }

    #[test]
    fn concave_loop_goes_through_earcut() {
        // L-shape: a fan from vertex 0 would cross the notch.
        let l_shape = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ];

        let triangles = triangulate_loop(&l_shape, &Vector3::z()).unwrap();
        assert_eq!(triangles.len(), 4);
    }

    #[test]
    fn short_loop_is_an_error() {
        let points = vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)];
        assert!(triangulate_loop(&points, &Vector3::z()).is_err());
    }

    #[test]
    fn newell_normal_of_a_tilted_loop() {
        let loop_xz = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 1.0),
        ];

        let normal = polygon_normal(&loop_xz).unwrap();
        assert!((normal.y.abs() - 1.0).abs() < 1e-9);
        assert!(normal.x.abs() < 1e-9);
    }

    #[test]
    fn degenerate_loop_has_no_normal() {
        let collinear = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        assert!(polygon_normal(&collinear).is_none());
    }
}
