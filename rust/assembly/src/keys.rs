// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arena key types for per-level scene storage.
//!
//! Keys are created by `slotmap::SlotMap` and stay valid across removals of
//! other entities (generational indices). Holding a key never keeps the
//! entity alive; lookups on a stale key simply return `None`.

use slotmap::new_key_type;

new_key_type! {
    /// Key for a triangulated solid in the level's solid arena.
    pub struct SolidKey;

    /// Key for a wall unit (record + current solid + cut list).
    pub struct WallKey;

    /// Key for an opening cut (tool solid + host wall).
    pub struct CutKey;

    /// Key for a placed window fixture.
    pub struct FixtureKey;
}
