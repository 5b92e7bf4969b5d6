// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Editor interaction state machine.

use nalgebra::{Point3, Vector3};
use planwerk_assembly::{FixtureKey, WallKey};

/// What the pointer is currently doing.
///
/// `AddPending` and `Moving` each carry the fixture being manipulated; the
/// current selection is tracked separately on the editor, since a fixture can
/// be selected without any drag in progress.
#[derive(Debug, Clone, Copy)]
pub enum EditorState {
    Idle,
    /// A ghost fixture follows the pointer until a click commits it.
    AddPending { fixture: FixtureKey },
    /// An existing fixture is being dragged along its construction plane.
    Moving {
        fixture: FixtureKey,
        /// Whether the pointer actually moved; a press-release without
        /// movement is a plain click.
        moved: bool,
        /// Last drag anchor on the construction plane.
        anchor: Point3<f64>,
        /// Normal of the construction plane (the fixture's facing).
        plane_normal: Vector3<f64>,
        /// Wall most recently found under the fixture while dragging.
        last_wall: Option<WallKey>,
    },
}

impl EditorState {
    pub fn is_idle(&self) -> bool {
        matches!(self, EditorState::Idle)
    }
}
