// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Component element registry
//!
//! Maps OpenRocket component element names to the constructor that builds
//! them. The table is built once per process and never mutated.

use once_cell::sync::Lazy;
use rocketdoc_model::{LoadError, Result};
use rustc_hash::FxHashMap;

/// How a component element is turned into a model component
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentType {
    Nosecone,
    /// Body tubes and other tube-shaped parts (inner tubes, couplers, lugs)
    BodyTube,
    /// Centering rings, bulkheads and engine blocks; built as a BodyTube
    Ring,
    Transition,
    Finset,
    /// Tube fins; built as a Finset
    TubeFinset,
    Mass,
    /// Recovery devices; built as a Mass
    Streamer,
    Parachute,
    ShockCord,
}

/// Attribute elements read by every component type
pub const COMMON_FIELDS: &[&str] = &["name", "color", "material", "finish", "subcomponents"];

static REGISTRY: Lazy<FxHashMap<&'static str, ComponentType>> = Lazy::new(|| {
    [
        ("nosecone", ComponentType::Nosecone),
        ("bodytube", ComponentType::BodyTube),
        ("innertube", ComponentType::BodyTube),
        ("tubecoupler", ComponentType::BodyTube),
        ("launchlug", ComponentType::BodyTube),
        ("centeringring", ComponentType::Ring),
        ("bulkhead", ComponentType::Ring),
        ("engineblock", ComponentType::Ring),
        ("transition", ComponentType::Transition),
        ("trapezoidfinset", ComponentType::Finset),
        ("ellipticalfinset", ComponentType::Finset),
        ("freeformfinset", ComponentType::Finset),
        ("tubefinset", ComponentType::TubeFinset),
        ("masscomponent", ComponentType::Mass),
        ("streamer", ComponentType::Streamer),
        ("parachute", ComponentType::Parachute),
        ("shockcord", ComponentType::ShockCord),
    ]
    .into_iter()
    .collect()
});

impl ComponentType {
    /// Look up the type for an element name
    pub fn lookup(identity: &str) -> Result<Self> {
        REGISTRY
            .get(identity)
            .copied()
            .ok_or_else(|| LoadError::unknown_component(identity))
    }

    /// Type-specific attribute elements consumed when mapping
    ///
    /// Anything not listed here or in [`COMMON_FIELDS`] is carried through as
    /// metadata.
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            ComponentType::Nosecone => &[
                "length",
                "thickness",
                "shape",
                "shapeparameter",
                "aftradius",
                "overridemass",
            ],
            ComponentType::BodyTube => &[
                "length",
                "thickness",
                "radius",
                "outerradius",
                "overridemass",
            ],
            ComponentType::Ring => &[
                "length",
                "outerradius",
                "innerradius",
                "thickness",
                "overridemass",
            ],
            ComponentType::Transition => &[
                "length",
                "thickness",
                "shape",
                "shapeparameter",
                "foreradius",
                "aftradius",
                "overridemass",
            ],
            ComponentType::Finset => &[
                "fincount",
                "rootchord",
                "tipchord",
                "sweeplength",
                "height",
                "thickness",
                "finpoints",
            ],
            ComponentType::TubeFinset => &["fincount", "length", "outerradius", "thickness"],
            ComponentType::Mass => &["mass", "packedlength", "packedradius"],
            ComponentType::Streamer => &[
                "packedlength",
                "packedradius",
                "overridemass",
                "striplength",
                "stripwidth",
            ],
            ComponentType::Parachute => &[
                "packedlength",
                "packedradius",
                "overridemass",
                "diameter",
            ],
            ComponentType::ShockCord => &[
                "packedlength",
                "packedradius",
                "overridemass",
                "cordlength",
            ],
        }
    }

    /// Whether a child element is consumed by this type
    pub fn consumes(&self, field: &str) -> bool {
        COMMON_FIELDS.contains(&field) || self.fields().contains(&field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(
            ComponentType::lookup("nosecone").unwrap(),
            ComponentType::Nosecone
        );
        assert_eq!(
            ComponentType::lookup("innertube").unwrap(),
            ComponentType::BodyTube
        );
        assert_eq!(
            ComponentType::lookup("freeformfinset").unwrap(),
            ComponentType::Finset
        );
        assert_eq!(
            ComponentType::lookup("streamer").unwrap(),
            ComponentType::Streamer
        );
    }

    #[test]
    fn test_structural_parts() {
        for identity in ["centeringring", "bulkhead", "engineblock"] {
            assert_eq!(ComponentType::lookup(identity).unwrap(), ComponentType::Ring);
        }
        assert_eq!(
            ComponentType::lookup("transition").unwrap(),
            ComponentType::Transition
        );
        assert_eq!(
            ComponentType::lookup("tubefinset").unwrap(),
            ComponentType::TubeFinset
        );
        assert!(ComponentType::Ring.consumes("innerradius"));
        assert!(ComponentType::Transition.consumes("foreradius"));
        assert!(!ComponentType::Transition.consumes("foreshoulderlength"));
    }

    #[test]
    fn test_unknown_identity() {
        let err = ComponentType::lookup("rocketsled").unwrap_err();
        assert!(matches!(err, LoadError::UnknownComponentType(ref name) if name == "rocketsled"));
        assert!(ComponentType::lookup("stage").is_err());
    }

    #[test]
    fn test_consumes() {
        let nose = ComponentType::Nosecone;
        assert!(nose.consumes("name"));
        assert!(nose.consumes("shapeparameter"));
        assert!(!nose.consumes("linestyle"));
        assert!(!ComponentType::Mass.consumes("thickness"));
    }
}
