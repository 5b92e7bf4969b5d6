// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Planwerk Model
//!
//! Typed records for the declarative JSON building model and a read-only
//! accessor that slices the model per level.
//!
//! All linear values in the source model are **millimeters**; records keep
//! them untouched. Consumers divide by 1000 at the point of use.
//!
//! ```rust,ignore
//! use planwerk_model::ModelAccessor;
//!
//! let accessor = ModelAccessor::from_json(&json_text)?;
//! for (index, level) in accessor.levels().iter().enumerate() {
//!     let structure = accessor.structure_for_level(index)?;
//!     println!("level {} has {} walls", level.number, structure.walls.len());
//! }
//! ```

pub mod accessor;
pub mod error;
pub mod records;

pub use accessor::{LevelStructure, ModelAccessor};
pub use error::{Error, Result};
pub use records::{
    ElementType, FloorRecord, FloorRole, Layer, LocationBinding, MemberGeometry, OpeningRecord,
    OpeningType, PatternMember, PointMm, Storey, VerticalBinding, WallLocation, WallPosition,
    WallRecord, WindowPattern, WindowPlacement,
};
