// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rocket design tree
//!
//! A [`Rocket`] owns its [`Stage`]s, each stage owns its top-level
//! [`Component`]s, and each component owns its nested components. Nothing is
//! shared between branches, so the tree is a strict forest by construction.
//!
//! All lengths are meters, masses kilograms and surface roughness micrometers.

use crate::{LoadError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Root of a design: a named, ordered list of stages
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rocket {
    /// Rocket name
    pub name: String,
    /// Stages in file order
    pub stages: Vec<Stage>,
}

impl Rocket {
    /// Create a rocket
    pub fn new(name: impl Into<String>, stages: Vec<Stage>) -> Self {
        Self {
            name: name.into(),
            stages,
        }
    }

    /// Total number of components in every stage (recursive)
    pub fn component_count(&self) -> usize {
        self.stages.iter().map(Stage::component_count).sum()
    }

    /// Find the first component with the given name, depth-first in file order
    pub fn find(&self, name: &str) -> Option<&Component> {
        self.stages.iter().find_map(|stage| {
            stage
                .components
                .iter()
                .find_map(|component| component.find(name))
        })
    }
}

/// One stage of a rocket
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    /// Stage name
    pub name: String,
    /// Top-level components, front to back
    pub components: Vec<Component>,
}

impl Stage {
    /// Create a stage
    pub fn new(name: impl Into<String>, components: Vec<Component>) -> Self {
        Self {
            name: name.into(),
            components,
        }
    }

    /// Number of components in this stage (recursive)
    pub fn component_count(&self) -> usize {
        self.components.iter().map(Component::component_count).sum()
    }
}

/// RGB color as a plain byte triple
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

impl From<Color> for (u8, u8, u8) {
    fn from(color: Color) -> Self {
        (color.r, color.g, color.b)
    }
}

/// Opaque key/value block carried through from the source file
///
/// Loaders put source attributes that have no place in the typed model here,
/// so downstream exporters can round-trip them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataBlock {
    /// Block name (source format or originating element)
    pub name: String,
    /// Key/value pairs as found in the source
    pub tags: BTreeMap<String, String>,
}

impl MetadataBlock {
    /// Create an empty block
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: BTreeMap::new(),
        }
    }

    /// Add a tag
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

/// A physical part of the rocket
///
/// Shared fields live here; variant-specific fields live in [`ComponentKind`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Component name
    pub name: String,
    /// Material name, if the source names one
    pub material_name: Option<String>,
    /// Length along the rocket axis (m)
    pub length: f64,
    /// Outer diameter (m)
    pub diameter: f64,
    /// Display color
    pub color: Option<Color>,
    /// Surface roughness (µm)
    pub surface_roughness: Option<f64>,
    /// Passthrough metadata, in source order
    pub tags: Vec<MetadataBlock>,
    /// Nested components, in source order
    pub components: Vec<Component>,
    /// Variant-specific data
    pub kind: ComponentKind,
}

impl Component {
    /// Create a component with the given variant and no optional data
    pub fn new(name: impl Into<String>, length: f64, diameter: f64, kind: ComponentKind) -> Self {
        Self {
            name: name.into(),
            material_name: None,
            length,
            diameter,
            color: None,
            surface_roughness: None,
            tags: Vec::new(),
            components: Vec::new(),
            kind,
        }
    }

    /// Count this component and everything nested in it
    pub fn component_count(&self) -> usize {
        1 + self
            .components
            .iter()
            .map(Component::component_count)
            .sum::<usize>()
    }

    /// Find this component or a descendant by name (depth-first)
    pub fn find(&self, name: &str) -> Option<&Component> {
        if self.name == name {
            return Some(self);
        }
        self.components.iter().find_map(|child| child.find(name))
    }

    pub fn as_nosecone(&self) -> Option<&Nosecone> {
        match &self.kind {
            ComponentKind::Nosecone(nose) => Some(nose),
            _ => None,
        }
    }

    pub fn as_body_tube(&self) -> Option<&BodyTube> {
        match &self.kind {
            ComponentKind::BodyTube(tube) => Some(tube),
            _ => None,
        }
    }

    pub fn as_transition(&self) -> Option<&Transition> {
        match &self.kind {
            ComponentKind::Transition(transition) => Some(transition),
            _ => None,
        }
    }

    pub fn as_finset(&self) -> Option<&Finset> {
        match &self.kind {
            ComponentKind::Finset(fins) => Some(fins),
            _ => None,
        }
    }

    pub fn as_mass(&self) -> Option<&Mass> {
        match &self.kind {
            ComponentKind::Mass(mass) => Some(mass),
            _ => None,
        }
    }
}

/// Closed set of component variants
///
/// Recovery devices such as streamers are constructed as [`ComponentKind::Mass`];
/// once loaded they are indistinguishable from an added mass. Centering
/// rings, bulkheads and engine blocks are tube-shaped and load as
/// [`ComponentKind::BodyTube`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ComponentKind {
    Nosecone(Nosecone),
    BodyTube(BodyTube),
    Transition(Transition),
    Finset(Finset),
    Mass(Mass),
}

impl ComponentKind {
    /// Variant name for display
    pub fn type_name(&self) -> &'static str {
        match self {
            ComponentKind::Nosecone(_) => "Nosecone",
            ComponentKind::BodyTube(_) => "BodyTube",
            ComponentKind::Transition(_) => "Transition",
            ComponentKind::Finset(_) => "Finset",
            ComponentKind::Mass(_) => "Mass",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Nose cone fields
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Nosecone {
    pub shape: Noseshape,
    /// Shape parameter; `0.0` for shapes that take none
    pub shape_parameter: f64,
    /// Wall thickness (m)
    pub thickness: f64,
    /// Mass of the shell alone (kg), when the source states it
    pub component_mass: Option<f64>,
}

/// Body tube fields
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyTube {
    /// Wall thickness (m)
    pub thickness: f64,
    /// Mass of the tube alone (kg), when the source states it
    pub component_mass: Option<f64>,
}

/// Shoulder between two body diameters
///
/// The component's own `diameter` is the larger of the two ends.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub shape: Noseshape,
    /// Shape parameter; `0.0` for shapes that take none
    pub shape_parameter: f64,
    /// Wall thickness (m)
    pub thickness: f64,
    /// Diameter at the forward end (m)
    pub fore_diameter: f64,
    /// Diameter at the aft end (m)
    pub aft_diameter: f64,
    /// Mass of the shell alone (kg), when the source states it
    pub component_mass: Option<f64>,
}

/// Fin set fields
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Finset {
    /// Number of fins, at least 1
    pub number_of_fins: u32,
    pub root_chord: Option<f64>,
    pub tip_chord: Option<f64>,
    pub sweep: Option<f64>,
    pub span: Option<f64>,
    pub thickness: Option<f64>,
}

/// Lumped point mass
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mass {
    /// Mass (kg)
    pub mass: f64,
}

/// Nose cone profile family
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Noseshape {
    Conical,
    Ogive,
    TangentOgive,
    Ellipsoid,
    Parabolic,
    PowerSeries,
    Haack,
}

impl Noseshape {
    /// Canonical upper-case name
    pub fn name(&self) -> &'static str {
        match self {
            Noseshape::Conical => "CONICAL",
            Noseshape::Ogive => "OGIVE",
            Noseshape::TangentOgive => "TANGENT_OGIVE",
            Noseshape::Ellipsoid => "ELLIPSOID",
            Noseshape::Parabolic => "PARABOLIC",
            Noseshape::PowerSeries => "POWER_SERIES",
            Noseshape::Haack => "HAACK",
        }
    }

    /// Whether the profile family is tuned by a shape parameter
    pub fn uses_parameter(&self) -> bool {
        matches!(
            self,
            Noseshape::Ogive | Noseshape::Parabolic | Noseshape::PowerSeries | Noseshape::Haack
        )
    }
}

impl fmt::Display for Noseshape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Noseshape {
    type Err = LoadError;

    /// Case-insensitive; accepts canonical names and OpenRocket keywords
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "conical" | "cone" => Ok(Noseshape::Conical),
            "ogive" => Ok(Noseshape::Ogive),
            "tangent_ogive" | "tangent ogive" => Ok(Noseshape::TangentOgive),
            "ellipsoid" | "elliptical" => Ok(Noseshape::Ellipsoid),
            "parabolic" | "parabola" => Ok(Noseshape::Parabolic),
            "power_series" | "power series" | "power" => Ok(Noseshape::PowerSeries),
            "haack" => Ok(Noseshape::Haack),
            _ => Err(LoadError::invalid_enum("shape", s)),
        }
    }
}
