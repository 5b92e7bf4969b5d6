// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall containment clamping.
//!
//! A fixture dragged along a wall must stay inside the wall's extents. Both
//! bounding boxes are taken into the fixture's rotated frame, where the wall
//! plane is spanned by the local X (length) and Y (height) axes; the facing
//! axis is left alone. The correction is minimal per axis, so clamping an
//! already-contained fixture is a no-op.

use nalgebra::{Point3, UnitQuaternion, Vector3};

type Aabb = (Point3<f64>, Point3<f64>);

/// Axis-aligned bounds of a world box re-expressed in a rotated frame.
fn rotate_aabb(bounds: Aabb, rotation: &UnitQuaternion<f64>) -> Aabb {
    let (bmin, bmax) = bounds;
    let mut min = Point3::new(f64::MAX, f64::MAX, f64::MAX);
    let mut max = Point3::new(f64::MIN, f64::MIN, f64::MIN);

    for corner in [
        Point3::new(bmin.x, bmin.y, bmin.z),
        Point3::new(bmax.x, bmin.y, bmin.z),
        Point3::new(bmin.x, bmax.y, bmin.z),
        Point3::new(bmax.x, bmax.y, bmin.z),
        Point3::new(bmin.x, bmin.y, bmax.z),
        Point3::new(bmax.x, bmin.y, bmax.z),
        Point3::new(bmin.x, bmax.y, bmax.z),
        Point3::new(bmax.x, bmax.y, bmax.z),
    ] {
        let p = rotation * corner;
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        min.z = min.z.min(p.z);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
        max.z = max.z.max(p.z);
    }

    (min, max)
}

/// World-space translation that brings the fixture box inside the wall box
/// on the two in-plane axes. Zero when already contained.
pub fn clamp_correction(
    fixture_bounds: Aabb,
    wall_bounds: Aabb,
    rotation: &UnitQuaternion<f64>,
) -> Vector3<f64> {
    let inverse = rotation.inverse();
    let (fix_min, fix_max) = rotate_aabb(fixture_bounds, &inverse);
    let (wall_min, wall_max) = rotate_aabb(wall_bounds, &inverse);

    let mut offset = Vector3::zeros();

    if fix_min.x < wall_min.x {
        offset.x = wall_min.x - fix_min.x;
    } else if fix_max.x > wall_max.x {
        offset.x = wall_max.x - fix_max.x;
    }

    if fix_min.y < wall_min.y {
        offset.y = wall_min.y - fix_min.y;
    } else if fix_max.y > wall_max.y {
        offset.y = wall_max.y - fix_max.y;
    }

    if offset == Vector3::zeros() {
        return offset;
    }

    rotation * offset
}
