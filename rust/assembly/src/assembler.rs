// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The building assembler: per-level pass pipeline.
//!
//! Pass order is fixed and load-bearing: walls first, then openings cut into
//! them, then window fixtures seated into the cuts, then floor plates. The
//! batched walls are merged last, after every cut is in.

use crate::context::{LevelContext, WallRenderPolicy};
use crate::error::Result;
use crate::pattern::{CatalogEntry, FixtureTemplate};
use crate::units::{direction, length_m, point_m};
use crate::walls;
use nalgebra::{Point3, UnitQuaternion, Vector3};
use planwerk_geometry::{extrude_contour, ExtrudeMode, Solid};
use planwerk_model::{FloorRole, LevelStructure, ModelAccessor, VerticalBinding, WallPosition};
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

/// Symmetric pierce depth for opening cut tools, meters. Greater than any
/// wall cross-section so the cut always goes clean through.
pub const PIERCE_DEPTH_M: f64 = 1.3;

/// Builds per-level scenes from a parsed model.
///
/// Window pattern templates are built once at construction and shared by
/// every level and by the interactive editor.
pub struct BuildingAssembler {
    templates: FxHashMap<String, FixtureTemplate>,
    catalog: Vec<CatalogEntry>,
}

impl BuildingAssembler {
    pub fn new(model: &ModelAccessor) -> Self {
        let mut templates = FxHashMap::default();
        let mut catalog = Vec::new();

        for pattern in model.window_patterns() {
            let template = FixtureTemplate::from_pattern(pattern);
            catalog.push(CatalogEntry {
                id: template.id.clone(),
                name: template.name.clone(),
            });
            templates.insert(template.id.clone(), template);
        }

        Self { templates, catalog }
    }

    /// `(id, display name)` of every known window pattern, in source order.
    pub fn catalog(&self) -> &[CatalogEntry] {
        &self.catalog
    }

    /// Look up a window pattern template by id.
    pub fn template(&self, id: &str) -> Option<&FixtureTemplate> {
        self.templates.get(id)
    }

    /// Assemble one level into a fresh [`LevelContext`].
    pub fn assemble_level(&self, model: &ModelAccessor, index: usize) -> Result<LevelContext> {
        let structure = model.structure_for_level(index)?;
        let mut ctx = LevelContext::new(length_m(structure.level.elevation));

        self.wall_pass(&structure, &mut ctx);
        self.opening_pass(&structure, &mut ctx);
        self.window_pass(&structure, &mut ctx);
        self.floor_pass(&structure, &mut ctx);

        ctx.merge_batched();

        debug!(
            level = structure.level.number,
            walls = ctx.walls.len(),
            cuts = ctx.cuts.len(),
            fixtures = ctx.fixtures.len(),
            floors = ctx.floors.len(),
            "level assembled"
        );
        Ok(ctx)
    }

    fn wall_pass(&self, structure: &LevelStructure<'_>, ctx: &mut LevelContext) {
        for record in &structure.walls {
            let element_type = structure
                .element_types
                .iter()
                .find(|et| et.id == record.element_type_id);
            let element_type = match element_type {
                Some(et) => et,
                None => {
                    warn!(wall = %record.id, element_type = %record.element_type_id,
                        "unknown element type, skipping wall");
                    continue;
                }
            };

            let thickness = length_m(element_type.total_thickness());
            let solid = match walls::build_wall_solid(record, thickness) {
                Ok(s) => s,
                Err(e) => {
                    warn!(wall = %record.id, error = %e, "skipping malformed wall");
                    continue;
                }
            };

            let policy = match record.wall_position_type {
                WallPosition::Facade => WallRenderPolicy::Individual,
                WallPosition::Interior => WallRenderPolicy::Batched,
            };

            ctx.insert_wall((*record).clone(), thickness, solid, policy);
        }
    }

    fn opening_pass(&self, structure: &LevelStructure<'_>, ctx: &mut LevelContext) {
        for opening in &structure.openings {
            let host = match ctx.wall_by_id(&opening.host_id) {
                Some(key) => key,
                None => {
                    // Host lives on another level or was skipped.
                    continue;
                }
            };

            let contour: Vec<Point3<f64>> = opening.profile.iter().map(point_m).collect();
            let tool = match extrude_contour(&contour, PIERCE_DEPTH_M, ExtrudeMode::Symmetric) {
                Ok(t) => t,
                Err(e) => {
                    warn!(opening = %opening.id, error = %e, "skipping malformed opening");
                    continue;
                }
            };

            if let Err(e) = ctx.apply_cut(host, tool, Some(opening.id.clone())) {
                warn!(opening = %opening.id, host = %opening.host_id, error = %e,
                    "failed to cut opening");
            }
        }
    }

    fn window_pass(&self, structure: &LevelStructure<'_>, ctx: &mut LevelContext) {
        for placement in structure.window_placements {
            let template = match self.templates.get(&placement.window_id) {
                Some(t) => t,
                None => {
                    warn!(window = %placement.window_id, "unknown window pattern, skipping");
                    continue;
                }
            };

            // Only placements whose openings were cut on this level belong here.
            let cuts: Vec<_> = placement
                .opening_group
                .iter()
                .filter_map(|id| ctx.cut_by_source_id(id))
                .collect();
            if cuts.is_empty() {
                continue;
            }

            let facing = match direction(&placement.direction).try_normalize(1e-10) {
                Some(d) => d,
                None => {
                    warn!(window = %placement.window_id, "degenerate facing direction, skipping");
                    continue;
                }
            };
            let rotation = UnitQuaternion::face_towards(&facing, &Vector3::y());
            let position = point_m(&placement.insertion_point);

            let key = ctx.spawn_fixture(template, position, rotation, true);
            if let Some(fixture) = ctx.fixtures.get_mut(key) {
                fixture.cuts = cuts;
            }
        }
    }

    fn floor_pass(&self, structure: &LevelStructure<'_>, ctx: &mut LevelContext) {
        for floor in &structure.floors {
            if floor.floor_role_type != FloorRole::Plate {
                continue;
            }

            let element_type = structure
                .element_types
                .iter()
                .find(|et| et.id == floor.element_type_id);
            let element_type = match element_type {
                Some(et) => et,
                None => {
                    warn!(storey = %floor.storey_id, element_type = %floor.element_type_id,
                        "unknown element type, skipping floor");
                    continue;
                }
            };

            let mut thickness = length_m(element_type.total_thickness());
            // A top-bound plate hangs below its reference plane.
            if floor.vertical_location_binding == VerticalBinding::Top {
                thickness = -thickness;
            }

            let contour: Vec<Point3<f64>> = floor.profile.iter().map(point_m).collect();
            let solid: Solid = match extrude_contour(&contour, thickness, ExtrudeMode::Single) {
                Ok(s) => s,
                Err(e) => {
                    warn!(storey = %floor.storey_id, error = %e, "skipping malformed floor");
                    continue;
                }
            };

            let key = ctx.solids.insert(solid);
            ctx.floors.push(key);
        }
    }
}
