// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall solid construction from centerline records.
//!
//! A wall record is a centerline segment plus a layered cross-section. The
//! footprint is built by offsetting the centerline perpendicular to its
//! direction; which side(s) get the thickness depends on the record's
//! location binding.

use crate::error::Result;
use crate::units::{length_m, point_m};
use nalgebra::{Point3, Vector3};
use planwerk_geometry::{extrude_contour, ExtrudeMode, Material, Solid};
use planwerk_model::{LocationBinding, WallPosition, WallRecord};

/// Batched interior walls.
pub const INTERIOR_WALL_COLOR: u32 = 0xcccccc;
/// Facade walls, kept individually addressable.
pub const FACADE_WALL_COLOR: u32 = 0xe8e590;

/// Ground-plane footprint of a wall: `[start+oL, end+oL, end+oR, start+oR]`.
///
/// The offset direction is the centerline rotated 90° in the horizontal
/// plane with reversed sense, which keeps the footprint winding consistent
/// regardless of centerline orientation (positive extrusion is always up).
pub fn wall_footprint(record: &WallRecord, thickness: f64) -> Result<[Point3<f64>; 4]> {
    let p1 = point_m(&record.location.start);
    let p2 = point_m(&record.location.end);

    let dir = Vector3::new(-(p1.z - p2.z), 0.0, -(p2.x - p1.x))
        .try_normalize(1e-10)
        .ok_or_else(|| {
            planwerk_geometry::Error::InvalidContour(format!(
                "Wall '{}' has a zero-length centerline",
                record.id
            ))
        })?
        * thickness;

    let (offset_l, offset_r) = match record.location_binding {
        LocationBinding::SideOut => (-dir, Vector3::zeros()),
        LocationBinding::SideIn => (Vector3::zeros(), dir),
        LocationBinding::Center => (-dir / 2.0, dir / 2.0),
    };

    Ok([p1 + offset_l, p2 + offset_l, p2 + offset_r, p1 + offset_r])
}

/// Build the wall solid: footprint extruded upward by the wall height,
/// colored by position type.
pub fn build_wall_solid(record: &WallRecord, thickness: f64) -> Result<Solid> {
    let footprint = wall_footprint(record, thickness)?;
    let solid = extrude_contour(&footprint, length_m(record.height), ExtrudeMode::Single)?;

    let color = match record.wall_position_type {
        WallPosition::Facade => FACADE_WALL_COLOR,
        WallPosition::Interior => INTERIOR_WALL_COLOR,
    };
    Ok(solid.with_material(Material::opaque(color)))
}
