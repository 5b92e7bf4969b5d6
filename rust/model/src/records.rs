// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structural records deserialized from the source JSON.
//!
//! Field names mirror the PascalCase keys of the source document. All records
//! are created once at load time and are read-only thereafter.

use serde::Deserialize;

/// A 3D point in source units (millimeters, Z-up).
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PointMm {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A building storey: elevation plus ordinal number.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Storey {
    pub id: String,
    pub number: i32,
    /// Elevation above site zero, millimeters.
    pub elevation: f64,
}

/// One material layer of an element cross-section.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Layer {
    /// Layer thickness, millimeters.
    pub thickness: f64,
}

/// Reusable cross-section definition shared by many walls/floors.
/// Total element thickness is the sum of its layer thicknesses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ElementType {
    pub id: String,
    pub layers: Vec<Layer>,
}

impl ElementType {
    /// Total cross-section thickness in millimeters.
    pub fn total_thickness(&self) -> f64 {
        self.layers.iter().map(|l| l.thickness).sum()
    }
}

/// Which side(s) of the centerline the wall thickness is built toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum LocationBinding {
    SideIn,
    SideOut,
    Center,
}

/// Render/material classification of a wall. Facade walls stay individually
/// addressable after assembly; everything else is batched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum WallPosition {
    Facade,
    #[serde(other)]
    Interior,
}

/// Wall centerline segment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WallLocation {
    pub start: PointMm,
    pub end: PointMm,
}

/// A wall structural record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WallRecord {
    pub id: String,
    pub storey_id: String,
    /// Wall height, millimeters.
    pub height: f64,
    pub element_type_id: String,
    pub wall_position_type: WallPosition,
    pub location_binding: LocationBinding,
    pub location: WallLocation,
}

/// Kind of opening cut into a host element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum OpeningType {
    Window,
    #[serde(other)]
    Other,
}

/// A void in a host wall, described by a closed profile loop.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OpeningRecord {
    pub id: String,
    pub host_id: String,
    pub opening_type: OpeningType,
    /// Closed planar loop, millimeters, first point not repeated.
    pub profile: Vec<PointMm>,
}

/// Placement of a window pattern into one or more opening cuts.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WindowPlacement {
    pub insertion_point: PointMm,
    /// Facing direction (unit-ish vector in source axes).
    pub direction: PointMm,
    pub window_id: String,
    pub opening_id: String,
    /// Ids of every opening cut the seated fixture straddles.
    pub opening_group: Vec<String>,
}

/// Extrusion geometry of one window pattern member.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MemberGeometry {
    pub profile: Vec<PointMm>,
    /// Member extrusion depth, millimeters.
    pub thickness: f64,
    pub direction: PointMm,
    /// Inner cutout loops subtracted from the member before it joins the
    /// template (e.g. a pane recess).
    #[serde(default)]
    pub inner_profiles: Vec<Vec<PointMm>>,
}

/// One member of a window pattern sub-assembly.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PatternMember {
    pub geometry: MemberGeometry,
}

/// Reusable window definition: three sub-assemblies of extruded members.
/// Parsed once and converted into a cloneable template, never mutated.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WindowPattern {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub expanders: Vec<PatternMember>,
    #[serde(default)]
    pub frames: Vec<PatternMember>,
    #[serde(default)]
    pub glasses: Vec<PatternMember>,
}

/// Role of a floor record. Only plates produce geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum FloorRole {
    Plate,
    StairLanding,
    Floor,
    #[serde(other)]
    Other,
}

/// Whether the plate thickness grows up or down from its reference plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum VerticalBinding {
    Top,
    #[serde(other)]
    Bottom,
}

/// A floor plate structural record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FloorRecord {
    pub storey_id: String,
    pub floor_role_type: FloorRole,
    pub vertical_location_binding: VerticalBinding,
    pub element_type_id: String,
    pub profile: Vec<PointMm>,
}

/// Root document shape: `Site.Building` structure plus the shared `Library`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct Document {
    pub site: Site,
    pub library: Library,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct Site {
    pub building: Building,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct Building {
    pub storeys: Vec<Storey>,
    pub elements: Elements,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct Elements {
    #[serde(default)]
    pub walls: Vec<WallRecord>,
    #[serde(default)]
    pub openings: Vec<OpeningRecord>,
    #[serde(default)]
    pub window_openings: Vec<WindowPlacement>,
    #[serde(default)]
    pub floors: Vec<FloorRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct Library {
    #[serde(default)]
    pub element_types: Vec<ElementType>,
    #[serde(default)]
    pub windows: Vec<WindowPattern>,
}
