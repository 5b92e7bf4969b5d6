// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planwerk Geometry
//!
//! Contour extrusion and boolean solid operations using earcutr
//! triangulation, nalgebra for transformations and csgrs for CSG.

pub mod boolean;
pub mod error;
pub mod extrude;
pub mod solid;
pub mod triangulation;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector2, Vector3};

pub use boolean::{aabb_to_solid, BooleanEngine};
pub use error::{Error, Result};
pub use extrude::{extrude_contour, ExtrudeMode};
pub use solid::{Material, Solid};
pub use triangulation::{polygon_normal, triangulate_loop};
