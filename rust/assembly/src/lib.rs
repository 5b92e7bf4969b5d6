// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Planwerk Assembly
//!
//! Turns the parsed building model into per-level 3D scenes. Assembly runs
//! four passes in a fixed order per level: walls, openings, window fixtures,
//! floor plates. All runtime state lives in a [`LevelContext`] whose arenas
//! hand out generational keys; the keys are the only cross-references between
//! walls, opening cuts and fixtures.
//!
//! A malformed element never aborts its level: it is logged and skipped, and
//! the remaining elements are built.

pub mod assembler;
pub mod context;
pub mod error;
pub mod keys;
pub mod pattern;
pub mod units;
pub mod walls;

pub use assembler::{BuildingAssembler, PIERCE_DEPTH_M};
pub use context::{Fixture, LevelContext, OpeningCut, WallRenderPolicy, WallUnit};
pub use error::{Error, Result};
pub use keys::{CutKey, FixtureKey, SolidKey, WallKey};
pub use pattern::{CatalogEntry, FixtureTemplate};
