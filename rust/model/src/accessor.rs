// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Read-only access to the loaded building model, sliced per level.

use crate::error::{Error, Result};
use crate::records::{
    Document, ElementType, FloorRecord, OpeningRecord, OpeningType, Storey, WallRecord,
    WindowPattern, WindowPlacement,
};
use rustc_hash::FxHashMap;

/// Everything the assembler needs to build one level.
///
/// Walls and floors are filtered by storey id. Openings are the model-wide
/// window openings; placements are model-wide as well — both reference their
/// hosts by id, so level membership follows from the host wall.
#[derive(Debug)]
pub struct LevelStructure<'a> {
    pub level: &'a Storey,
    pub walls: Vec<&'a WallRecord>,
    pub element_types: &'a [ElementType],
    pub openings: Vec<&'a OpeningRecord>,
    pub window_placements: &'a [WindowPlacement],
    pub floors: Vec<&'a FloorRecord>,
}

/// Owns the parsed model and answers structural queries.
///
/// Structural records are immutable after load.
#[derive(Debug)]
pub struct ModelAccessor {
    document: Document,
    element_type_index: FxHashMap<String, usize>,
}

impl ModelAccessor {
    /// Parse a model from its JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let document: Document = serde_json::from_str(text)?;

        let element_type_index = document
            .library
            .element_types
            .iter()
            .enumerate()
            .map(|(i, et)| (et.id.clone(), i))
            .collect();

        Ok(Self {
            document,
            element_type_index,
        })
    }

    /// Ordered storeys, as authored.
    pub fn levels(&self) -> &[Storey] {
        &self.document.site.building.storeys
    }

    /// Reusable window pattern source records.
    pub fn window_patterns(&self) -> &[WindowPattern] {
        &self.document.library.windows
    }

    /// Look up a shared element type by id.
    pub fn element_type(&self, id: &str) -> Option<&ElementType> {
        self.element_type_index
            .get(id)
            .map(|&i| &self.document.library.element_types[i])
    }

    /// Slice the model for one level by ordinal index.
    pub fn structure_for_level(&self, index: usize) -> Result<LevelStructure<'_>> {
        let storeys = self.levels();
        let level = storeys.get(index).ok_or(Error::LevelOutOfRange {
            index,
            count: storeys.len(),
        })?;

        let elements = &self.document.site.building.elements;

        let walls = elements
            .walls
            .iter()
            .filter(|w| w.storey_id == level.id)
            .collect();

        // Only window-type openings participate in the opening pass.
        let openings = elements
            .openings
            .iter()
            .filter(|o| o.opening_type == OpeningType::Window)
            .collect();

        let floors = elements
            .floors
            .iter()
            .filter(|f| f.storey_id == level.id)
            .collect();

        Ok(LevelStructure {
            level,
            walls,
            element_types: &self.document.library.element_types,
            openings,
            window_placements: &elements.window_openings,
            floors,
        })
    }
}
