// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-level runtime state.
//!
//! The [`LevelContext`] owns every solid, wall, opening cut and fixture of
//! one storey in slot-map arenas. Entities reference each other only through
//! arena keys, so a fixture can point at its cuts and a cut at its host wall
//! without any shared ownership.

use crate::error::{Error, Result};
use crate::keys::{CutKey, FixtureKey, SolidKey, WallKey};
use crate::pattern::FixtureTemplate;
use crate::walls;
use nalgebra::{Point3, UnitQuaternion, Vector3};
use planwerk_geometry::{BooleanEngine, Material, Solid};
use planwerk_model::WallRecord;
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use tracing::warn;

/// How a wall participates in rendering after assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallRenderPolicy {
    /// Folded into the level's static batch; no longer individually editable.
    Batched,
    /// Kept as its own solid (facade walls, which host window fixtures).
    Individual,
}

/// A wall's runtime state: source record, current solid, cut bookkeeping.
#[derive(Debug)]
pub struct WallUnit {
    pub record: WallRecord,
    /// Total cross-section thickness in meters.
    pub thickness: f64,
    /// Current solid, `None` once merged into the level batch.
    pub solid: Option<SolidKey>,
    /// Cuts applied to this wall, in creation order.
    pub cuts: Vec<CutKey>,
    pub policy: WallRenderPolicy,
}

/// A boolean cut taken out of a host wall. The tool solid is kept in world
/// space so the cut can be replayed when the host is rebuilt.
#[derive(Debug)]
pub struct OpeningCut {
    /// Source opening id for cuts from the model; `None` for editor cuts.
    pub source_id: Option<String>,
    pub tool: Solid,
    pub host: WallKey,
}

/// A placed window fixture: cloned template members plus a world transform.
#[derive(Debug)]
pub struct Fixture {
    pub pattern_id: String,
    /// Member solids in template-local space.
    pub members: Vec<Solid>,
    pub position: Point3<f64>,
    pub rotation: UnitQuaternion<f64>,
    /// Ghost fixtures stay invisible until they first land on a wall.
    pub visible: bool,
    /// Cuts this fixture is seated into, in creation order.
    pub cuts: Vec<CutKey>,
    /// Center of the local bounding box, used to seat the fixture on a
    /// surface hit point.
    pub local_center: Vector3<f64>,
}

impl Fixture {
    /// Facing direction: local +Z taken to world.
    pub fn facing(&self) -> Vector3<f64> {
        self.rotation * Vector3::z()
    }

    /// World-space axis-aligned bounding box over all members.
    /// `None` when the fixture has no geometry.
    pub fn world_bounds(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let mut min = Point3::new(f64::MAX, f64::MAX, f64::MAX);
        let mut max = Point3::new(f64::MIN, f64::MIN, f64::MIN);
        let mut any = false;

        for member in &self.members {
            for chunk in member.positions.chunks_exact(3) {
                let local = Point3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
                let world = self.rotation * local + self.position.coords;
                min.x = min.x.min(world.x);
                min.y = min.y.min(world.y);
                min.z = min.z.min(world.z);
                max.x = max.x.max(world.x);
                max.y = max.y.max(world.y);
                max.z = max.z.max(world.z);
                any = true;
            }
        }

        any.then_some((min, max))
    }
}

/// Arena-backed state of one assembled storey.
#[derive(Debug, Default)]
pub struct LevelContext {
    /// Storey elevation in meters.
    pub elevation: f64,
    pub solids: SlotMap<SolidKey, Solid>,
    pub walls: SlotMap<WallKey, WallUnit>,
    pub cuts: SlotMap<CutKey, OpeningCut>,
    pub fixtures: SlotMap<FixtureKey, Fixture>,
    /// Floor plate solids, in record order.
    pub floors: Vec<SolidKey>,
    /// Merged solid of all batched walls, set by [`LevelContext::merge_batched`].
    pub batch: Option<SolidKey>,
    wall_index: FxHashMap<String, WallKey>,
    cut_index: FxHashMap<String, CutKey>,
}

impl LevelContext {
    pub fn new(elevation: f64) -> Self {
        Self {
            elevation,
            ..Default::default()
        }
    }

    /// Register a wall with its freshly built solid.
    pub fn insert_wall(
        &mut self,
        record: WallRecord,
        thickness: f64,
        solid: Solid,
        policy: WallRenderPolicy,
    ) -> WallKey {
        let solid_key = self.solids.insert(solid);
        let id = record.id.clone();
        let key = self.walls.insert(WallUnit {
            record,
            thickness,
            solid: Some(solid_key),
            cuts: Vec::new(),
            policy,
        });
        self.wall_index.insert(id, key);
        key
    }

    /// Look up a wall by its source record id.
    pub fn wall_by_id(&self, id: &str) -> Option<WallKey> {
        self.wall_index.get(id).copied()
    }

    /// Current solid of a wall, if it still has one of its own.
    pub fn wall_solid(&self, key: WallKey) -> Option<&Solid> {
        self.walls
            .get(key)?
            .solid
            .and_then(|sk| self.solids.get(sk))
    }

    /// Look up a cut by the source opening id that created it.
    pub fn cut_by_source_id(&self, id: &str) -> Option<CutKey> {
        self.cut_index.get(id).copied()
    }

    /// Subtract a tool from a wall and record the cut on the wall.
    ///
    /// The tool is retained in the cut record so the wall can be rebuilt
    /// later with the remaining cuts replayed. A zero-face result is kept
    /// (the wall was swallowed whole) and logged.
    pub fn apply_cut(
        &mut self,
        wall: WallKey,
        tool: Solid,
        source_id: Option<String>,
    ) -> Result<CutKey> {
        let unit = self.walls.get(wall).ok_or(Error::UnknownWall)?;
        let solid_key = unit.solid.ok_or_else(|| Error::WallNotEditable {
            id: unit.record.id.clone(),
        })?;
        let wall_id = unit.record.id.clone();

        let target = self
            .solids
            .remove(solid_key)
            .ok_or(Error::WallNotEditable { id: wall_id.clone() })?;

        let result = BooleanEngine::subtract(target, tool.clone())?;
        if result.is_empty() {
            warn!(wall = %wall_id, "cut consumed the entire wall solid");
        }

        let new_solid = self.solids.insert(result);
        let cut = self.cuts.insert(OpeningCut {
            source_id: source_id.clone(),
            tool,
            host: wall,
        });

        if let Some(unit) = self.walls.get_mut(wall) {
            unit.solid = Some(new_solid);
            unit.cuts.push(cut);
        }
        if let Some(id) = source_id {
            self.cut_index.insert(id, cut);
        }

        Ok(cut)
    }

    /// Remove a cut: dispose the tool and unlink it from its host wall.
    /// The host's solid is left untouched; call [`LevelContext::rebuild_wall`]
    /// afterwards to replay the remaining cuts.
    pub fn remove_cut(&mut self, cut: CutKey) -> Option<WallKey> {
        let removed = self.cuts.remove(cut)?;
        if let Some(id) = &removed.source_id {
            self.cut_index.remove(id);
        }
        if let Some(unit) = self.walls.get_mut(removed.host) {
            unit.cuts.retain(|&c| c != cut);
        }
        Some(removed.host)
    }

    /// Rebuild a wall from its source record and replay its remaining cuts
    /// in original creation order.
    pub fn rebuild_wall(&mut self, wall: WallKey) -> Result<()> {
        let unit = self.walls.get(wall).ok_or(Error::UnknownWall)?;
        if unit.solid.is_none() {
            return Err(Error::WallNotEditable {
                id: unit.record.id.clone(),
            });
        }

        let mut solid = walls::build_wall_solid(&unit.record, unit.thickness)?;

        let tools: Vec<Solid> = unit
            .cuts
            .iter()
            .filter_map(|&c| self.cuts.get(c).map(|cut| cut.tool.clone()))
            .collect();
        for tool in tools {
            solid = BooleanEngine::subtract(solid, tool)?;
        }

        let new_key = self.solids.insert(solid);
        if let Some(unit) = self.walls.get_mut(wall) {
            if let Some(old) = unit.solid.replace(new_key) {
                self.solids.remove(old);
            }
        }
        Ok(())
    }

    /// Instantiate a fixture from a template at the given transform.
    pub fn spawn_fixture(
        &mut self,
        template: &FixtureTemplate,
        position: Point3<f64>,
        rotation: UnitQuaternion<f64>,
        visible: bool,
    ) -> FixtureKey {
        self.fixtures.insert(Fixture {
            pattern_id: template.id.clone(),
            members: template.members.clone(),
            position,
            rotation,
            visible,
            cuts: Vec::new(),
            local_center: template.local_center,
        })
    }

    /// Fold every batched wall solid into one static level batch.
    ///
    /// One-way: batched walls lose their individual solids and are no longer
    /// editable afterwards.
    pub fn merge_batched(&mut self) {
        let batched: Vec<WallKey> = self
            .walls
            .iter()
            .filter(|(_, w)| w.policy == WallRenderPolicy::Batched && w.solid.is_some())
            .map(|(k, _)| k)
            .collect();

        if batched.is_empty() {
            return;
        }

        let mut batch = Solid::new().with_material(Material::opaque(walls::INTERIOR_WALL_COLOR));
        for key in batched {
            let solid_key = match self.walls.get_mut(key).and_then(|w| w.solid.take()) {
                Some(sk) => sk,
                None => continue,
            };
            if let Some(solid) = self.solids.remove(solid_key) {
                batch.merge(&solid);
            }
        }

        self.batch = Some(self.solids.insert(batch));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planwerk_model::{LocationBinding, PointMm, WallLocation, WallPosition};

    fn wall_record(id: &str) -> WallRecord {
        WallRecord {
            id: id.to_string(),
            storey_id: "s1".to_string(),
            height: 2500.0,
            element_type_id: "et1".to_string(),
            wall_position_type: WallPosition::Facade,
            location_binding: LocationBinding::Center,
            location: WallLocation {
                start: PointMm {
                    x: 0.0,
                    y: 0.0,
                    z: 0.0,
                },
                end: PointMm {
                    x: 4000.0,
                    y: 0.0,
                    z: 0.0,
                },
            },
        }
    }

    fn seeded_wall(ctx: &mut LevelContext, id: &str, policy: WallRenderPolicy) -> WallKey {
        let record = wall_record(id);
        let solid = walls::build_wall_solid(&record, 0.2).unwrap();
        ctx.insert_wall(record, 0.2, solid, policy)
    }

    fn window_tool() -> Solid {
        planwerk_geometry::aabb_to_solid(
            Point3::new(1.0, 0.8, -0.5),
            Point3::new(2.0, 2.0, 0.5),
        )
    }

    #[test]
    fn apply_and_remove_cut_restores_wall() {
        let mut ctx = LevelContext::new(0.0);
        let wall = seeded_wall(&mut ctx, "w1", WallRenderPolicy::Individual);

        let pristine_triangles = ctx.wall_solid(wall).unwrap().triangle_count();

        let cut = ctx.apply_cut(wall, window_tool(), Some("o1".to_string())).unwrap();
        assert_eq!(ctx.walls[wall].cuts, vec![cut]);
        assert_eq!(ctx.cut_by_source_id("o1"), Some(cut));
        assert!(ctx.wall_solid(wall).unwrap().triangle_count() > pristine_triangles);

        let host = ctx.remove_cut(cut).unwrap();
        assert_eq!(host, wall);
        ctx.rebuild_wall(wall).unwrap();
        assert_eq!(
            ctx.wall_solid(wall).unwrap().triangle_count(),
            pristine_triangles
        );
        assert!(ctx.cut_by_source_id("o1").is_none());
    }

    #[test]
    fn merge_batched_is_one_way() {
        let mut ctx = LevelContext::new(0.0);
        let batched = seeded_wall(&mut ctx, "w1", WallRenderPolicy::Batched);
        let facade = seeded_wall(&mut ctx, "w2", WallRenderPolicy::Individual);

        let batched_triangles = ctx.wall_solid(batched).unwrap().triangle_count();

        ctx.merge_batched();

        assert!(ctx.wall_solid(batched).is_none());
        assert!(ctx.wall_solid(facade).is_some());

        let batch = ctx.solids.get(ctx.batch.unwrap()).unwrap();
        assert_eq!(batch.triangle_count(), batched_triangles);

        // Batched wall is no longer editable.
        assert!(matches!(
            ctx.apply_cut(batched, window_tool(), None),
            Err(Error::WallNotEditable { .. })
        ));
    }

    #[test]
    fn fixture_world_bounds_follow_transform() {
        let fixture = Fixture {
            pattern_id: "win1".to_string(),
            members: vec![planwerk_geometry::aabb_to_solid(
                Point3::origin(),
                Point3::new(1.0, 1.0, 0.1),
            )],
            position: Point3::new(10.0, 0.0, 0.0),
            rotation: UnitQuaternion::identity(),
            visible: true,
            cuts: Vec::new(),
            local_center: Vector3::zeros(),
        };

        let (min, max) = fixture.world_bounds().unwrap();
        assert!((min.x - 10.0).abs() < 1e-6);
        assert!((max.x - 11.0).abs() < 1e-6);
    }
}
