// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Picking abstraction between the editor and its rendering host.

use nalgebra::{Point3, Vector3};
use planwerk_assembly::{FixtureKey, LevelContext, WallKey};

/// A pointer ray intersection with a wall solid.
#[derive(Debug, Clone, Copy)]
pub struct WallHit {
    pub wall: WallKey,
    /// Intersection point in world space.
    pub point: Point3<f64>,
    /// Surface normal at the intersection, unit length.
    pub normal: Vector3<f64>,
    /// Distance along the pointer ray.
    pub distance: f64,
}

/// A pointer ray intersection with a placed fixture.
#[derive(Debug, Clone, Copy)]
pub struct FixtureHit {
    pub fixture: FixtureKey,
    pub point: Point3<f64>,
    pub distance: f64,
}

/// Ray casting against the current scene, implemented by the rendering host.
///
/// Every method casts the host's current pointer ray. Results are ordered
/// near to far; an empty result means the ray missed.
pub trait HitTester {
    fn cast_walls(&self, ctx: &LevelContext) -> Vec<WallHit>;

    fn cast_fixtures(&self, ctx: &LevelContext) -> Vec<FixtureHit>;

    /// Intersect the pointer ray with the infinite plane through `origin`
    /// with the given normal.
    fn cast_plane(&self, origin: Point3<f64>, normal: Vector3<f64>) -> Option<Point3<f64>>;
}
