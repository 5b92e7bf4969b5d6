// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for model operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or querying the building model
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid model JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Level index {index} out of range (model has {count} storeys)")]
    LevelOutOfRange { index: usize, count: usize },
}
