// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Window pattern templates.
//!
//! A pattern record is parsed once into a [`FixtureTemplate`]: every member
//! (expanders, frames, glasses) extruded from its profile, inner cutouts
//! already subtracted. Placing a window clones the template members; the
//! template itself is never mutated.

use crate::units::{length_m, member_point_m};
use nalgebra::{Point3, Vector3};
use planwerk_geometry::{extrude_contour, BooleanEngine, ExtrudeMode, Material, Solid};
use planwerk_model::{MemberGeometry, WindowPattern};
use tracing::warn;

/// Frame and expander members.
pub const MEMBER_COLOR: u32 = 0xffffff;
/// Glazing panes.
pub const GLASS_COLOR: u32 = 0x60c3fc;
pub const GLASS_OPACITY: f32 = 0.2;

/// Symmetric depth of inner cutout tools. Deeper than any member.
pub const CUTOUT_DEPTH_M: f64 = 1.0;

/// One entry of the fixture catalog published to external panels.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
}

/// A fully built, cloneable window template in local space.
#[derive(Debug)]
pub struct FixtureTemplate {
    pub id: String,
    pub name: String,
    pub members: Vec<Solid>,
    /// Center of the combined local bounding box.
    pub local_center: Vector3<f64>,
}

impl FixtureTemplate {
    /// Build a template from its pattern record. Malformed members are
    /// logged and skipped; the rest of the pattern still builds.
    pub fn from_pattern(pattern: &WindowPattern) -> Self {
        let glass = Material::translucent(GLASS_COLOR, GLASS_OPACITY);
        let opaque = Material::opaque(MEMBER_COLOR);

        let groups: [(&str, &[planwerk_model::PatternMember], Material); 3] = [
            ("expander", &pattern.expanders, opaque),
            ("frame", &pattern.frames, opaque),
            ("glass", &pattern.glasses, glass),
        ];

        let mut members = Vec::new();
        for (kind, group, material) in groups {
            for member in group {
                match build_member(&member.geometry, material) {
                    Ok(solid) => members.push(solid),
                    Err(e) => {
                        warn!(pattern = %pattern.id, kind, error = %e, "skipping window member");
                    }
                }
            }
        }

        let local_center = local_center(&members);

        Self {
            id: pattern.id.clone(),
            name: pattern.name.clone(),
            members,
            local_center,
        }
    }
}

/// Extrude one member and subtract its inner cutouts.
fn build_member(
    geometry: &MemberGeometry,
    material: Material,
) -> planwerk_geometry::Result<Solid> {
    let depth_sign = geometry.direction.y;

    let contour: Vec<Point3<f64>> = geometry
        .profile
        .iter()
        .map(|p| member_point_m(p, depth_sign))
        .collect();

    let mut solid = extrude_contour(&contour, length_m(geometry.thickness), ExtrudeMode::Single)?
        .with_material(material);

    for inner in &geometry.inner_profiles {
        let cut_contour: Vec<Point3<f64>> = inner
            .iter()
            .map(|p| member_point_m(p, depth_sign))
            .collect();
        let tool = extrude_contour(&cut_contour, CUTOUT_DEPTH_M, ExtrudeMode::Symmetric)?;
        solid = BooleanEngine::subtract(solid, tool)?;
    }

    Ok(solid)
}

fn local_center(members: &[Solid]) -> Vector3<f64> {
    let mut min = Point3::new(f64::MAX, f64::MAX, f64::MAX);
    let mut max = Point3::new(f64::MIN, f64::MIN, f64::MIN);
    let mut any = false;

    for member in members {
        if member.is_empty() {
            continue;
        }
        let (m0, m1) = member.bounds();
        min.x = min.x.min(m0.x);
        min.y = min.y.min(m0.y);
        min.z = min.z.min(m0.z);
        max.x = max.x.max(m1.x);
        max.y = max.y.max(m1.y);
        max.z = max.z.max(m1.z);
        any = true;
    }

    if any {
        (min.coords + max.coords) / 2.0
    } else {
        Vector3::zeros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planwerk_model::{PatternMember, PointMm};

    fn mm(x: f64, y: f64, z: f64) -> PointMm {
        PointMm { x, y, z }
    }

    fn frame_member(inner: bool) -> PatternMember {
        PatternMember {
            geometry: MemberGeometry {
                profile: vec![
                    mm(0.0, 0.0, 0.0),
                    mm(1000.0, 0.0, 0.0),
                    mm(1000.0, 0.0, 1200.0),
                    mm(0.0, 0.0, 1200.0),
                ],
                thickness: 60.0,
                direction: mm(0.0, 1.0, 0.0),
                inner_profiles: if inner {
                    vec![vec![
                        mm(100.0, 0.0, 100.0),
                        mm(900.0, 0.0, 100.0),
                        mm(900.0, 0.0, 1100.0),
                        mm(100.0, 0.0, 1100.0),
                    ]]
                } else {
                    Vec::new()
                },
            },
        }
    }

    fn pattern(members: Vec<PatternMember>) -> WindowPattern {
        WindowPattern {
            id: "win1".to_string(),
            name: "Single pane".to_string(),
            expanders: Vec::new(),
            frames: members,
            glasses: Vec::new(),
        }
    }

    #[test]
    fn template_builds_members() {
        let template = FixtureTemplate::from_pattern(&pattern(vec![frame_member(false)]));
        assert_eq!(template.members.len(), 1);
        assert_eq!(template.members[0].material.color, MEMBER_COLOR);

        // 1m x 1.2m frame centered at (0.5, 0.6) in local XY.
        assert!((template.local_center.x - 0.5).abs() < 1e-6);
        assert!((template.local_center.y - 0.6).abs() < 1e-6);
    }

    #[test]
    fn inner_cutout_adds_reveal_faces() {
        let plain = FixtureTemplate::from_pattern(&pattern(vec![frame_member(false)]));
        let cut = FixtureTemplate::from_pattern(&pattern(vec![frame_member(true)]));

        assert!(
            cut.members[0].triangle_count() > plain.members[0].triangle_count(),
            "cutout should add geometry for the recess"
        );
    }

    #[test]
    fn malformed_member_is_skipped() {
        let mut bad = frame_member(false);
        bad.geometry.profile.truncate(2);

        let template = FixtureTemplate::from_pattern(&pattern(vec![bad, frame_member(false)]));
        assert_eq!(template.members.len(), 1);
    }

    #[test]
    fn glass_material() {
        let mut p = pattern(Vec::new());
        p.glasses = vec![frame_member(false)];
        let template = FixtureTemplate::from_pattern(&p);
        assert_eq!(template.members[0].material.color, GLASS_COLOR);
        assert!((template.members[0].material.opacity - GLASS_OPACITY).abs() < 1e-6);
    }
}
