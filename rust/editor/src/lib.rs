// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Planwerk Editor
//!
//! Pointer-driven editing of window fixtures in an assembled level:
//! placement from the pattern catalog, dragging along a wall, swapping the
//! pattern of a placed fixture, and deletion with full host-wall restore.
//!
//! The editor is deliberately renderer-agnostic. Picking goes through the
//! [`HitTester`] trait, which the rendering host implements against its
//! camera and pointer ray; the editor only consumes ordered hit lists.

pub mod clamp;
pub mod editor;
pub mod error;
pub mod hit;
pub mod state;

pub use clamp::clamp_correction;
pub use editor::{InteractiveEditor, SelectionCallback, MAX_INSERT_HOSTS, SURFACE_OFFSET_M};
pub use error::{Error, Result};
pub use hit::{FixtureHit, HitTester, WallHit};
pub use state::EditorState;
