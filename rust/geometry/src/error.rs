// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during geometry processing
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid contour: {0}")]
    InvalidContour(String),

    #[error("Triangulation failed: {0}")]
    TriangulationError(String),

    #[error("Empty solid: {0}")]
    EmptySolid(String),
}
