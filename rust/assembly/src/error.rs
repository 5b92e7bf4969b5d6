// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for assembly operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during building assembly
#[derive(Error, Debug)]
pub enum Error {
    #[error("Model error: {0}")]
    Model(#[from] planwerk_model::Error),

    #[error("Geometry error: {0}")]
    Geometry(#[from] planwerk_geometry::Error),

    #[error("Wall '{id}' has no editable solid")]
    WallNotEditable { id: String },

    #[error("Unknown wall key")]
    UnknownWall,
}
