// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Unit and axis conversion from source records to working space.
//!
//! The source model is millimeters, Z-up. The working space is meters, Y-up.
//! Every consumed coordinate swaps Y and Z and divides by 1000; records
//! themselves stay in source units.

use nalgebra::{Point3, Vector3};
use planwerk_model::PointMm;

pub const MM_PER_M: f64 = 1000.0;

/// Millimeters to meters.
#[inline]
pub fn length_m(mm: f64) -> f64 {
    mm / MM_PER_M
}

/// Source point (mm, Z-up) to working point (m, Y-up).
#[inline]
pub fn point_m(p: &PointMm) -> Point3<f64> {
    Point3::new(p.x / MM_PER_M, p.z / MM_PER_M, p.y / MM_PER_M)
}

/// Source direction to working axes (swap only, no scaling).
#[inline]
pub fn direction(d: &PointMm) -> Vector3<f64> {
    Vector3::new(d.x, d.z, d.y)
}

/// Window member profile point: like [`point_m`] but with the local depth
/// component scaled by the member's direction Y component.
#[inline]
pub fn member_point_m(p: &PointMm, depth_sign: f64) -> Point3<f64> {
    Point3::new(p.x / MM_PER_M, p.z / MM_PER_M, depth_sign * p.y / MM_PER_M)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_swaps_up_axis_and_scales() {
        let p = PointMm {
            x: 4000.0,
            y: 2000.0,
            z: 3000.0,
        };
        let m = point_m(&p);
        assert_eq!(m, Point3::new(4.0, 3.0, 2.0));
    }

    #[test]
    fn direction_swaps_without_scaling() {
        let d = PointMm {
            x: 0.0,
            y: 1.0,
            z: 0.0,
        };
        assert_eq!(direction(&d), Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn member_point_scales_depth_by_direction() {
        let p = PointMm {
            x: 500.0,
            y: 60.0,
            z: 1200.0,
        };
        let m = member_point_m(&p, -1.0);
        assert_eq!(m, Point3::new(0.5, 1.2, -0.06));
    }
}
