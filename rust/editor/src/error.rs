// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for editor operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during interactive editing
#[derive(Error, Debug)]
pub enum Error {
    #[error("Assembly error: {0}")]
    Assembly(#[from] planwerk_assembly::Error),

    #[error("Unknown window pattern '{0}'")]
    UnknownPattern(String),

    #[error("Stale fixture key")]
    StaleFixture,
}
