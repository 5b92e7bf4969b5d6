// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The interactive editor.
//!
//! Drives the [`EditorState`] machine from pointer events, keeps the
//! current selection, and performs the boolean bookkeeping for inserting,
//! moving, swapping and deleting window fixtures. Pointer events that hit
//! nothing are silent no-ops.

use crate::clamp::clamp_correction;
use crate::error::{Error, Result};
use crate::hit::HitTester;
use crate::state::EditorState;
use nalgebra::{Point3, UnitQuaternion, Vector3};
use planwerk_assembly::{
    BuildingAssembler, FixtureKey, LevelContext, WallKey,
};
use planwerk_geometry::aabb_to_solid;
use tracing::{debug, warn};

/// Gap between a placed fixture and the wall surface it was dropped on.
pub const SURFACE_OFFSET_M: f64 = 0.15;

/// Maximum number of walls an insert commits cuts into.
pub const MAX_INSERT_HOSTS: usize = 3;

/// Called whenever the current selection changes.
pub type SelectionCallback = Box<dyn FnMut(Option<FixtureKey>)>;

pub struct InteractiveEditor<'a> {
    assembler: &'a BuildingAssembler,
    state: EditorState,
    selection: Option<FixtureKey>,
    on_selection_changed: Option<SelectionCallback>,
}

impl<'a> InteractiveEditor<'a> {
    pub fn new(assembler: &'a BuildingAssembler) -> Self {
        Self {
            assembler,
            state: EditorState::Idle,
            selection: None,
            on_selection_changed: None,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn selection(&self) -> Option<FixtureKey> {
        self.selection
    }

    pub fn set_selection_callback(&mut self, callback: SelectionCallback) {
        self.on_selection_changed = Some(callback);
    }

    fn set_selection(&mut self, selection: Option<FixtureKey>) {
        if self.selection != selection {
            self.selection = selection;
            if let Some(callback) = &mut self.on_selection_changed {
                callback(selection);
            }
        }
    }

    /// Catalog request: with a current selection this swaps the selected
    /// fixture's pattern; without one it starts a new placement with an
    /// invisible ghost that appears on the first wall hit.
    pub fn request_pattern(&mut self, ctx: &mut LevelContext, pattern_id: &str) -> Result<()> {
        if self.selection.is_some() {
            self.swap_selection(ctx, pattern_id)
        } else {
            self.begin_placement(ctx, pattern_id)
        }
    }

    /// Spawn an invisible ghost fixture and enter `AddPending`.
    ///
    /// A ghost left over from an earlier catalog click is despawned first;
    /// only one pending placement exists at a time.
    pub fn begin_placement(&mut self, ctx: &mut LevelContext, pattern_id: &str) -> Result<()> {
        let template = self
            .assembler
            .template(pattern_id)
            .ok_or_else(|| Error::UnknownPattern(pattern_id.to_string()))?;

        if let EditorState::AddPending { fixture } = self.state {
            ctx.fixtures.remove(fixture);
        }

        let fixture = ctx.spawn_fixture(
            template,
            Point3::origin(),
            UnitQuaternion::identity(),
            false,
        );
        self.state = EditorState::AddPending { fixture };
        Ok(())
    }

    pub fn pointer_down(&mut self, ctx: &mut LevelContext, hits: &impl HitTester) -> Result<()> {
        match self.state {
            EditorState::AddPending { fixture } => {
                if self.commit_insert(ctx, hits, fixture)? {
                    self.state = EditorState::Idle;
                    self.set_selection(None);
                }
                // No wall under the pointer: stay pending.
            }
            _ => {
                let top = hits.cast_fixtures(ctx).into_iter().next();
                if let (Some(hit), Some(selected)) = (top, self.selection) {
                    if hit.fixture == selected {
                        // Clicking the selected fixture re-spawns it as a
                        // fresh clone and starts a drag.
                        let fresh = self.respawn(ctx, selected)?;
                        let rotation = ctx
                            .fixtures
                            .get(fresh)
                            .map(|f| f.rotation)
                            .unwrap_or_else(UnitQuaternion::identity);
                        self.set_selection(Some(fresh));
                        self.state = EditorState::Moving {
                            fixture: fresh,
                            moved: false,
                            anchor: hit.point,
                            plane_normal: rotation * Vector3::z(),
                            last_wall: None,
                        };
                    }
                }
            }
        }
        Ok(())
    }

    pub fn pointer_move(&mut self, ctx: &mut LevelContext, hits: &impl HitTester) {
        match &mut self.state {
            EditorState::AddPending { fixture } => {
                let fixture = *fixture;
                let hit = match hits.cast_walls(ctx).first().copied() {
                    Some(h) => h,
                    None => return, // Keep the last valid position.
                };

                let rotation = UnitQuaternion::face_towards(&hit.normal, &Vector3::y());
                if let Some(f) = ctx.fixtures.get_mut(fixture) {
                    f.visible = true;
                    f.rotation = rotation;
                    let center_offset = rotation * f.local_center;
                    f.position = hit.point - hit.normal * SURFACE_OFFSET_M - center_offset;
                }

                Self::clamp_fixture(ctx, fixture, hit.wall);
            }

            EditorState::Moving {
                fixture,
                moved,
                anchor,
                plane_normal,
                last_wall,
            } => {
                let fixture = *fixture;
                let point = match hits.cast_plane(*anchor, *plane_normal) {
                    Some(p) => p,
                    None => return,
                };

                let delta = point - *anchor;
                *anchor = point;
                if delta != Vector3::zeros() {
                    *moved = true;
                }

                if let Some(f) = ctx.fixtures.get_mut(fixture) {
                    f.position += delta;
                }

                if let Some(hit) = hits.cast_walls(ctx).first() {
                    *last_wall = Some(hit.wall);
                }
                if let Some(wall) = *last_wall {
                    let correction = Self::clamp_fixture(ctx, fixture, wall);
                    *anchor += correction;
                }
            }

            EditorState::Idle => {}
        }
    }

    pub fn pointer_up(&mut self, ctx: &mut LevelContext, hits: &impl HitTester) -> Result<()> {
        match std::mem::replace(&mut self.state, EditorState::Idle) {
            EditorState::Moving {
                fixture,
                moved: true,
                last_wall,
                ..
            } => {
                let hosts: Vec<WallKey> = last_wall.into_iter().collect();
                self.commit_cuts(ctx, fixture, &hosts)?;
                self.set_selection(Some(fixture));
            }

            EditorState::Moving { moved: false, .. } | EditorState::Idle => {
                // Plain click: select whatever fixture is on top, or clear.
                let top = hits.cast_fixtures(ctx).into_iter().next();
                self.set_selection(top.map(|h| h.fixture));
            }

            // Placement commits on pointer down, not up.
            pending @ EditorState::AddPending { .. } => {
                self.state = pending;
            }
        }
        Ok(())
    }

    /// Delete the selected fixture, restoring every host wall it cut into.
    pub fn delete_selection(&mut self, ctx: &mut LevelContext) -> Result<()> {
        if let Some(fixture) = self.selection {
            self.delete_fixture(ctx, fixture)?;
            self.set_selection(None);
        }
        Ok(())
    }

    /// Replace the selected fixture with another pattern at the same
    /// transform, re-cutting the same host walls. Without a selection this
    /// behaves like [`InteractiveEditor::begin_placement`].
    pub fn swap_selection(&mut self, ctx: &mut LevelContext, pattern_id: &str) -> Result<()> {
        let selected = match self.selection {
            Some(key) => key,
            None => return self.begin_placement(ctx, pattern_id),
        };

        let template = self
            .assembler
            .template(pattern_id)
            .ok_or_else(|| Error::UnknownPattern(pattern_id.to_string()))?;

        let (position, rotation, hosts) = {
            let fixture = ctx.fixtures.get(selected).ok_or(Error::StaleFixture)?;
            let mut hosts: Vec<WallKey> = Vec::new();
            for &cut in &fixture.cuts {
                if let Some(c) = ctx.cuts.get(cut) {
                    if !hosts.contains(&c.host) {
                        hosts.push(c.host);
                    }
                }
            }
            (fixture.position, fixture.rotation, hosts)
        };

        self.delete_fixture(ctx, selected)?;

        let fresh = ctx.spawn_fixture(template, position, rotation, true);
        self.commit_cuts(ctx, fresh, &hosts)?;

        self.selection = None; // Force a change notification.
        self.set_selection(Some(fresh));
        Ok(())
    }

    /// Commit a pending placement against the walls under the pointer.
    /// Returns false (and stays uncommitted) when the pointer misses.
    fn commit_insert(
        &mut self,
        ctx: &mut LevelContext,
        hits: &impl HitTester,
        fixture: FixtureKey,
    ) -> Result<bool> {
        let wall_hits = hits.cast_walls(ctx);
        if wall_hits.is_empty() {
            return Ok(false);
        }

        let hosts: Vec<WallKey> = wall_hits
            .iter()
            .take(MAX_INSERT_HOSTS)
            .map(|h| h.wall)
            .collect();
        self.commit_cuts(ctx, fixture, &hosts)?;
        Ok(true)
    }

    /// Cut the fixture's expanded bounding box out of each host wall and
    /// record the cuts on both sides.
    fn commit_cuts(
        &mut self,
        ctx: &mut LevelContext,
        fixture: FixtureKey,
        hosts: &[WallKey],
    ) -> Result<()> {
        let (bounds, facing) = {
            let f = ctx.fixtures.get(fixture).ok_or(Error::StaleFixture)?;
            (f.world_bounds(), f.facing())
        };
        let (min, max) = match bounds {
            Some(b) => b,
            None => return Ok(()), // Empty fixture cuts nothing.
        };

        // Expand along the facing axis so the cut pierces both wall faces.
        let expand = Vector3::new(facing.x.abs(), facing.y.abs(), facing.z.abs());
        let tool = aabb_to_solid(min - expand, max + expand);

        for &wall in hosts {
            match ctx.apply_cut(wall, tool.clone(), None) {
                Ok(cut) => {
                    if let Some(f) = ctx.fixtures.get_mut(fixture) {
                        f.cuts.push(cut);
                    }
                }
                Err(e) => {
                    // Batched or vanished walls are skipped, the rest of the
                    // commit still applies.
                    warn!(error = %e, "skipping host wall during commit");
                }
            }
        }

        if let Some(f) = ctx.fixtures.get_mut(fixture) {
            f.visible = true;
        }
        debug!(hosts = hosts.len(), "fixture committed");
        Ok(())
    }

    /// Remove a fixture and restore each host wall by rebuilding it from its
    /// source record and replaying the remaining cuts in creation order.
    fn delete_fixture(&mut self, ctx: &mut LevelContext, fixture: FixtureKey) -> Result<()> {
        let cuts = ctx
            .fixtures
            .get(fixture)
            .ok_or(Error::StaleFixture)?
            .cuts
            .clone();

        for cut in cuts {
            let host = match ctx.remove_cut(cut) {
                Some(h) => h,
                None => continue,
            };
            if let Err(e) = ctx.rebuild_wall(host) {
                warn!(error = %e, "failed to rebuild wall after cut removal");
            }
        }

        ctx.fixtures.remove(fixture);
        Ok(())
    }

    /// Respawn a fixture as a fresh clone of its pattern at the same
    /// transform, restoring its host walls. Used when a drag starts.
    fn respawn(&mut self, ctx: &mut LevelContext, fixture: FixtureKey) -> Result<FixtureKey> {
        let (pattern_id, position, rotation) = {
            let f = ctx.fixtures.get(fixture).ok_or(Error::StaleFixture)?;
            (f.pattern_id.clone(), f.position, f.rotation)
        };

        let template = self
            .assembler
            .template(&pattern_id)
            .ok_or(Error::UnknownPattern(pattern_id))?;

        self.delete_fixture(ctx, fixture)?;
        Ok(ctx.spawn_fixture(template, position, rotation, true))
    }

    /// Clamp a fixture inside a wall's extents; returns the world correction
    /// that was applied (zero when already contained).
    fn clamp_fixture(ctx: &mut LevelContext, fixture: FixtureKey, wall: WallKey) -> Vector3<f64> {
        let wall_bounds = match ctx.wall_solid(wall).map(|s| s.bounds()) {
            Some(b) => b,
            None => return Vector3::zeros(),
        };
        let (fixture_bounds, rotation) = match ctx.fixtures.get(fixture) {
            Some(f) => match f.world_bounds() {
                Some(b) => (b, f.rotation),
                None => return Vector3::zeros(),
            },
            None => return Vector3::zeros(),
        };

        let correction = clamp_correction(fixture_bounds, wall_bounds, &rotation);
        if correction != Vector3::zeros() {
            if let Some(f) = ctx.fixtures.get_mut(fixture) {
                f.position += correction;
            }
        }
        correction
    }
}
