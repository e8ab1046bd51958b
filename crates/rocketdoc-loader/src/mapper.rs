// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Markup element to component mapping
//!
//! [`map_component`] turns one OpenRocket component element into a
//! [`Component`], recursing into its `<subcomponents>`. Each call returns an
//! owned value built only from its own element and the [`Placement`] handed
//! down by the caller, so the result is a tree by construction.

use crate::markup::{
    child, child_text, elements, is_leaf, optional_attr_f64, optional_f64, parse_f64,
    required_f64, required_text, required_u32, tag,
};
use crate::registry::ComponentType;
use crate::units::finish_roughness;
use log::{debug, trace};
use rocketdoc_model::{
    BodyTube, Color, Component, ComponentKind, Finset, LoadError, Mass, MetadataBlock, Nosecone,
    Noseshape, Result, Transition,
};
use roxmltree::Node;
use std::f64::consts::PI;

/// Name of the metadata block holding unconsumed leaf elements
pub const PASSTHROUGH_BLOCK: &str = "openrocket";

/// Geometry a component inherits from its position in the tree
///
/// Used to resolve radii the source writes as `auto`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Placement {
    /// Outer radius of the enclosing component
    pub parent_outer_radius: Option<f64>,
    /// Inner radius of the enclosing component
    pub parent_inner_radius: Option<f64>,
    /// Nearest explicit radius ahead of a top-level component in its stage
    pub fore_radius: Option<f64>,
    /// Nearest explicit radius behind a top-level component in its stage
    pub aft_radius: Option<f64>,
    /// Largest explicit outer radius of an inner tube with the same parent
    pub inner_tube_radius: Option<f64>,
}

impl Placement {
    /// Placement for a top-level stage component
    pub fn top_level(fore_radius: Option<f64>, aft_radius: Option<f64>) -> Self {
        Self {
            fore_radius,
            aft_radius,
            ..Self::default()
        }
    }

    fn inside(outer_radius: f64, inner_radius: f64) -> Self {
        Self {
            parent_outer_radius: Some(outer_radius),
            parent_inner_radius: Some(inner_radius),
            ..Self::default()
        }
    }

    /// `auto` radius, preferring the forward neighbour
    fn fore_auto(&self) -> Option<f64> {
        self.fore_radius
            .or(self.aft_radius)
            .or(self.parent_inner_radius)
    }

    /// `auto` radius, preferring the aft neighbour
    fn aft_auto(&self) -> Option<f64> {
        self.aft_radius
            .or(self.fore_radius)
            .or(self.parent_inner_radius)
    }
}

/// Variant data plus the envelope its children are placed in
struct Built {
    length: f64,
    diameter: f64,
    kind: ComponentKind,
    /// Placement handed to nested components
    interior: Placement,
}

/// Map a component element, and everything nested in it, to a [`Component`]
pub fn map_component(node: Node<'_, '_>, placement: Placement) -> Result<Component> {
    let identity = tag(node);
    let component_type = ComponentType::lookup(identity)?;
    let name = required_text(node, "name")?;

    let built = match component_type {
        ComponentType::Nosecone => build_nosecone(node, &placement)?,
        ComponentType::BodyTube => build_tube(node, &placement)?,
        ComponentType::Ring => build_ring(node, &placement)?,
        ComponentType::Transition => build_transition(node, &placement)?,
        ComponentType::Finset => build_finset(node, &placement)?,
        ComponentType::TubeFinset => build_tube_finset(node, &placement)?,
        ComponentType::Mass => build_mass(node, &placement)?,
        ComponentType::Streamer | ComponentType::Parachute | ComponentType::ShockCord => {
            build_recovery(node, component_type, &placement)?
        }
    };

    let components = match child(node, "subcomponents") {
        Some(list) => {
            let interior = Placement {
                inner_tube_radius: inner_tube_radius(list),
                ..built.interior
            };
            elements(list)
                .map(|c| map_component(c, interior))
                .collect::<Result<Vec<_>>>()?
        }
        None => Vec::new(),
    };

    trace!(
        "mapped <{}> '{}' as {} with {} children",
        identity,
        name,
        built.kind,
        components.len()
    );

    Ok(Component {
        name: name.to_string(),
        material_name: child_text(node, "material").map(str::to_string),
        length: built.length,
        diameter: built.diameter,
        color: parse_color(node)?,
        surface_roughness: child_text(node, "finish")
            .map(finish_roughness)
            .transpose()?,
        tags: collect_metadata(node, component_type),
        components,
        kind: built.kind,
    })
}

/// Explicit radii at the forward and aft ends of a component element
///
/// `auto` and absent fields give `None`. The stage loader uses these to
/// resolve `auto` radii among siblings.
pub fn declared_edges(node: Node<'_, '_>) -> (Option<f64>, Option<f64>) {
    let explicit = |field: &str| child_text(node, field).and_then(parse_f64);
    let body = explicit("radius").or_else(|| explicit("outerradius"));
    (
        explicit("foreradius").or(body),
        explicit("aftradius").or(body),
    )
}

/// Largest explicit outer radius among the inner tubes of a subcomponent list
fn inner_tube_radius(list: Node<'_, '_>) -> Option<f64> {
    elements(list)
        .filter(|c| c.has_tag_name("innertube"))
        .filter_map(|tube| child_text(tube, "outerradius").and_then(parse_f64))
        .fold(None, |widest: Option<f64>, r| Some(widest.map_or(r, |w| w.max(r))))
}

/// Profile family and parameter, shared by nose cones and transitions
///
/// The parameter may be left out only for families that take none.
fn read_shape(node: Node<'_, '_>) -> Result<(Noseshape, f64)> {
    let shape = required_text(node, "shape")?.parse::<Noseshape>()?;
    let parameter = match optional_f64(node, "shapeparameter")? {
        Some(parameter) => parameter,
        None if shape.uses_parameter() => {
            return Err(LoadError::missing(tag(node), "shapeparameter"))
        }
        None => 0.0,
    };
    let shape = match shape {
        // An ogive with parameter 1 is the tangent ogive
        Noseshape::Ogive if parameter == 1.0 => Noseshape::TangentOgive,
        shape => shape,
    };
    Ok((shape, parameter))
}

fn build_nosecone(node: Node<'_, '_>, placement: &Placement) -> Result<Built> {
    let thickness = required_f64(node, "thickness")?;
    let (shape, shape_parameter) = read_shape(node)?;
    let radius = resolve_radius(node, "aftradius", placement.aft_auto())?;

    Ok(Built {
        length: required_f64(node, "length")?,
        diameter: 2.0 * radius,
        kind: ComponentKind::Nosecone(Nosecone {
            shape,
            shape_parameter,
            thickness,
            component_mass: optional_f64(node, "overridemass")?,
        }),
        interior: Placement::inside(radius, radius - thickness),
    })
}

fn build_tube(node: Node<'_, '_>, placement: &Placement) -> Result<Built> {
    let thickness = required_f64(node, "thickness")?;
    let field = if child(node, "radius").is_some() {
        "radius"
    } else {
        "outerradius"
    };
    let radius = resolve_radius(node, field, placement.fore_auto())?;

    Ok(Built {
        length: required_f64(node, "length")?,
        diameter: 2.0 * radius,
        kind: ComponentKind::BodyTube(BodyTube {
            thickness,
            component_mass: optional_f64(node, "overridemass")?,
        }),
        interior: Placement::inside(radius, radius - thickness),
    })
}

/// Centering rings, bulkheads and engine blocks become a [`BodyTube`]
///
/// The inner radius comes from `thickness` when given, else from
/// `innerradius`, where `auto` is the inner tube the ring sits on. A ring
/// with neither is solid.
fn build_ring(node: Node<'_, '_>, placement: &Placement) -> Result<Built> {
    let outer = resolve_radius(node, "outerradius", placement.fore_auto())?;
    let inner = match optional_dimension(node, "thickness")? {
        Some(thickness) => outer - thickness,
        None if child(node, "innerradius").is_some() => {
            resolve_radius(node, "innerradius", placement.inner_tube_radius)?
        }
        None => 0.0,
    };
    if !(0.0..=outer).contains(&inner) {
        return Err(LoadError::document(format!(
            "<{}> inner radius {} does not fit outer radius {}",
            tag(node),
            inner,
            outer
        )));
    }

    Ok(Built {
        length: required_f64(node, "length")?,
        diameter: 2.0 * outer,
        kind: ComponentKind::BodyTube(BodyTube {
            thickness: outer - inner,
            component_mass: optional_f64(node, "overridemass")?,
        }),
        interior: Placement::inside(outer, inner),
    })
}

fn build_transition(node: Node<'_, '_>, placement: &Placement) -> Result<Built> {
    let thickness = required_f64(node, "thickness")?;
    let (shape, shape_parameter) = read_shape(node)?;
    let fore = resolve_radius(node, "foreradius", placement.fore_auto())?;
    let aft = resolve_radius(node, "aftradius", placement.aft_auto())?;
    let radius = fore.max(aft);

    Ok(Built {
        length: required_f64(node, "length")?,
        diameter: 2.0 * radius,
        kind: ComponentKind::Transition(Transition {
            shape,
            shape_parameter,
            thickness,
            fore_diameter: 2.0 * fore,
            aft_diameter: 2.0 * aft,
            component_mass: optional_f64(node, "overridemass")?,
        }),
        interior: Placement::inside(radius, radius - thickness),
    })
}

fn fin_count(node: Node<'_, '_>) -> Result<u32> {
    let count = required_u32(node, "fincount")?;
    if count == 0 {
        return Err(LoadError::document(format!(
            "<{}> declares zero fins",
            tag(node)
        )));
    }
    Ok(count)
}

fn build_finset(node: Node<'_, '_>, placement: &Placement) -> Result<Built> {
    let number_of_fins = fin_count(node)?;
    let root_chord = optional_f64(node, "rootchord")?;
    let length = match root_chord {
        Some(chord) => chord,
        None => freeform_extent(node)?.ok_or_else(|| LoadError::missing(tag(node), "rootchord"))?,
    };
    let body_radius = placement
        .parent_outer_radius
        .ok_or_else(|| LoadError::missing(tag(node), "radius"))?;

    Ok(Built {
        length,
        diameter: 2.0 * body_radius,
        kind: ComponentKind::Finset(Finset {
            number_of_fins,
            root_chord,
            tip_chord: optional_f64(node, "tipchord")?,
            sweep: optional_f64(node, "sweeplength")?,
            span: optional_f64(node, "height")?,
            thickness: optional_f64(node, "thickness")?,
        }),
        interior: *placement,
    })
}

/// Tube fins become a [`Finset`] spanning the tube diameter
fn build_tube_finset(node: Node<'_, '_>, placement: &Placement) -> Result<Built> {
    let number_of_fins = fin_count(node)?;
    let body_radius = placement
        .parent_outer_radius
        .ok_or_else(|| LoadError::missing(tag(node), "radius"))?;

    Ok(Built {
        length: required_f64(node, "length")?,
        diameter: 2.0 * body_radius,
        kind: ComponentKind::Finset(Finset {
            number_of_fins,
            root_chord: None,
            tip_chord: None,
            sweep: None,
            span: optional_dimension(node, "outerradius")?.map(|r| 2.0 * r),
            thickness: optional_dimension(node, "thickness")?,
        }),
        interior: *placement,
    })
}

/// Chordwise extent of a freeform fin's point list
fn freeform_extent(node: Node<'_, '_>) -> Result<Option<f64>> {
    let Some(points) = child(node, "finpoints") else {
        return Ok(None);
    };
    let xs = elements(points)
        .filter(|p| p.has_tag_name("point"))
        .filter_map(|p| optional_attr_f64(p, "x").transpose())
        .collect::<Result<Vec<f64>>>()?;
    if xs.is_empty() {
        return Ok(None);
    }
    let min = xs.iter().copied().fold(f64::INFINITY, f64::min);
    let max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Ok(Some(max - min))
}

fn build_mass(node: Node<'_, '_>, placement: &Placement) -> Result<Built> {
    let radius = resolve_radius(node, "packedradius", placement.fore_auto())?;
    Ok(Built {
        length: required_f64(node, "packedlength")?,
        diameter: 2.0 * radius,
        kind: ComponentKind::Mass(Mass {
            mass: required_f64(node, "mass")?,
        }),
        interior: Placement::inside(radius, radius),
    })
}

/// Streamers, parachutes and shock cords all become a [`Mass`]
fn build_recovery(
    node: Node<'_, '_>,
    component_type: ComponentType,
    placement: &Placement,
) -> Result<Built> {
    let radius = resolve_radius(node, "packedradius", placement.fore_auto())?;
    let mass = match optional_f64(node, "overridemass")? {
        Some(mass) => mass,
        None => recovery_mass(node, component_type)?.unwrap_or(0.0),
    };
    Ok(Built {
        length: required_f64(node, "packedlength")?,
        diameter: 2.0 * radius,
        kind: ComponentKind::Mass(Mass { mass }),
        interior: Placement::inside(radius, radius),
    })
}

/// Mass from material density and the device's own dimensions
///
/// Streamer and parachute materials carry a surface density (kg/m²), shock
/// cords a line density (kg/m).
fn recovery_mass(node: Node<'_, '_>, component_type: ComponentType) -> Result<Option<f64>> {
    let Some(density) = child(node, "material")
        .map(|m| optional_attr_f64(m, "density"))
        .transpose()?
        .flatten()
    else {
        return Ok(None);
    };
    let extent = match component_type {
        ComponentType::Streamer => optional_f64(node, "striplength")?
            .zip(optional_f64(node, "stripwidth")?)
            .map(|(length, width)| length * width),
        ComponentType::Parachute => optional_f64(node, "diameter")?.map(|d| PI * (d / 2.0).powi(2)),
        ComponentType::ShockCord => optional_f64(node, "cordlength")?,
        _ => None,
    };
    Ok(extent.map(|e| e * density))
}

/// Read a radius field, substituting `auto` with the given value
fn resolve_radius(node: Node<'_, '_>, field: &str, auto: Option<f64>) -> Result<f64> {
    let text = required_text(node, field)?;
    if text.eq_ignore_ascii_case("auto") {
        return auto.ok_or_else(|| LoadError::missing(tag(node), field));
    }
    parse_f64(text).ok_or_else(|| LoadError::missing(tag(node), field))
}

/// Optional dimension where `auto` is left unresolved
fn optional_dimension(node: Node<'_, '_>, field: &str) -> Result<Option<f64>> {
    match child_text(node, field) {
        Some(text) if text.eq_ignore_ascii_case("auto") => Ok(None),
        _ => optional_f64(node, field),
    }
}

fn parse_color(node: Node<'_, '_>) -> Result<Option<Color>> {
    let Some(color) = child(node, "color") else {
        return Ok(None);
    };
    let channel = |name: &str| {
        color
            .attribute(name)
            .and_then(|v| lexical_core::parse::<u8>(v.trim().as_bytes()).ok())
            .ok_or_else(|| LoadError::missing("color", name))
    };
    Ok(Some(Color::new(
        channel("red")?,
        channel("green")?,
        channel("blue")?,
    )))
}

/// Gather unconsumed attribute elements into metadata blocks
///
/// Leaf elements go into one [`PASSTHROUGH_BLOCK`]; each element with
/// children gets its own block of its leaf children.
fn collect_metadata(node: Node<'_, '_>, component_type: ComponentType) -> Vec<MetadataBlock> {
    let mut passthrough = MetadataBlock::new(PASSTHROUGH_BLOCK);
    let mut nested = Vec::new();

    for element in elements(node).filter(|e| !component_type.consumes(tag(*e))) {
        if is_leaf(element) {
            passthrough
                .tags
                .insert(tag(element).to_string(), leaf_text(element));
        } else {
            debug!(
                "carrying <{}> of <{}> through as metadata",
                tag(element),
                tag(node)
            );
            let mut block = MetadataBlock::new(tag(element));
            for leaf in elements(element).filter(|e| is_leaf(*e)) {
                block.tags.insert(tag(leaf).to_string(), leaf_text(leaf));
            }
            nested.push(block);
        }
    }

    let mut blocks = Vec::with_capacity(nested.len() + 1);
    if !passthrough.is_empty() {
        blocks.push(passthrough);
    }
    blocks.extend(nested);
    blocks
}

fn leaf_text(node: Node<'_, '_>) -> String {
    node.text().map(str::trim).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::parse_document;
    use approx::assert_relative_eq;

    fn map(xml: &str, placement: Placement) -> Result<Component> {
        let doc = parse_document(xml)?;
        map_component(doc.root_element(), placement)
    }

    const NOSE: &str = r#"<nosecone>
  <name>Nosecone</name>
  <color red="165" green="165" blue="165"/>
  <linestyle>solid</linestyle>
  <finish>normal</finish>
  <material type="bulk" density="1050.0">Polystyrene</material>
  <length>0.15</length>
  <thickness>0.001</thickness>
  <shape>ogive</shape>
  <shapeclipped>false</shapeclipped>
  <shapeparameter>1.0</shapeparameter>
  <aftradius>0.025</aftradius>
  <subcomponents>
    <masscomponent>
      <name>Ballast</name>
      <packedlength>0.01</packedlength>
      <packedradius>auto</packedradius>
      <mass>0.02</mass>
    </masscomponent>
  </subcomponents>
</nosecone>"#;

    #[test]
    fn test_nosecone() {
        let nose = map(NOSE, Placement::default()).unwrap();

        assert_eq!(nose.name, "Nosecone");
        assert_eq!(nose.material_name.as_deref(), Some("Polystyrene"));
        assert_eq!(nose.color, Some(Color::new(165, 165, 165)));
        assert_eq!(nose.surface_roughness, Some(60.0));
        assert_relative_eq!(nose.length, 0.15);
        assert_relative_eq!(nose.diameter, 0.05);

        let fields = nose.as_nosecone().unwrap();
        assert_eq!(fields.shape, Noseshape::TangentOgive);
        assert_relative_eq!(fields.shape_parameter, 1.0);
        assert_relative_eq!(fields.thickness, 0.001);
        assert_eq!(fields.component_mass, None);

        assert_eq!(nose.tags.len(), 1);
        assert_eq!(nose.tags[0].name, PASSTHROUGH_BLOCK);
        assert_eq!(nose.tags[0].get("linestyle"), Some("solid"));
        assert_eq!(nose.tags[0].get("shapeclipped"), Some("false"));
        assert_eq!(nose.tags[0].len(), 2);
    }

    #[test]
    fn test_nested_auto_radius_uses_parent_interior() {
        let nose = map(NOSE, Placement::default()).unwrap();
        let ballast = &nose.components[0];

        assert_eq!(nose.components.len(), 1);
        assert_relative_eq!(ballast.diameter, 2.0 * (0.025 - 0.001));
        assert_relative_eq!(ballast.as_mass().unwrap().mass, 0.02);
        assert!(ballast.tags.is_empty());
    }

    #[test]
    fn test_secant_ogive() {
        let xml = NOSE.replace(
            "<shapeparameter>1.0</shapeparameter>",
            "<shapeparameter>0.6</shapeparameter>",
        );
        let nose = map(&xml, Placement::default()).unwrap();
        assert_eq!(nose.as_nosecone().unwrap().shape, Noseshape::Ogive);
    }

    #[test]
    fn test_invalid_shape() {
        let xml = NOSE.replace("<shape>ogive</shape>", "<shape>bulbous</shape>");
        assert!(matches!(
            map(&xml, Placement::default()),
            Err(LoadError::InvalidEnumValue { .. })
        ));
    }

    #[test]
    fn test_missing_required_field() {
        let xml = NOSE.replace("<thickness>0.001</thickness>", "");
        let err = map(&xml, Placement::default()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingRequiredField { ref element, ref field }
                if element == "nosecone" && field == "thickness"
        ));
    }

    #[test]
    fn test_unknown_nested_component() {
        let xml = NOSE.replace("masscomponent>", "rocketsled>");
        assert!(matches!(
            map(&xml, Placement::default()),
            Err(LoadError::UnknownComponentType(ref name)) if name == "rocketsled"
        ));
    }

    #[test]
    fn test_body_tube_with_auto_radius_and_finset() {
        let xml = r#"<bodytube>
  <name>Body tube</name>
  <finish>normal</finish>
  <material type="bulk" density="680.0">Kraft phenolic</material>
  <overridemass>0.086</overridemass>
  <length>0.3</length>
  <thickness>0.002</thickness>
  <radius>auto</radius>
  <subcomponents>
    <trapezoidfinset>
      <name>Fins</name>
      <fincount>3</fincount>
      <rootchord>0.05</rootchord>
      <tipchord>0.03</tipchord>
      <sweeplength>0.02</sweeplength>
      <height>0.04</height>
      <thickness>0.003</thickness>
      <crosssection>square</crosssection>
    </trapezoidfinset>
  </subcomponents>
</bodytube>"#;
        let body = map(xml, Placement::top_level(Some(0.025), None)).unwrap();

        assert_eq!(body.color, None);
        assert_relative_eq!(body.diameter, 0.05);
        let tube = body.as_body_tube().unwrap();
        assert_eq!(tube.component_mass, Some(0.086));
        assert_relative_eq!(tube.thickness, 0.002);

        let fins = &body.components[0];
        let finset = fins.as_finset().unwrap();
        assert_eq!(finset.number_of_fins, 3);
        assert_eq!(finset.span, Some(0.04));
        assert_relative_eq!(fins.length, 0.05);
        assert_relative_eq!(fins.diameter, 0.05);
        assert_eq!(fins.tags[0].get("crosssection"), Some("square"));
    }

    #[test]
    fn test_unresolvable_auto_radius() {
        let xml = r#"<bodytube>
  <name>Lonely tube</name>
  <length>0.3</length>
  <thickness>0.002</thickness>
  <radius>auto</radius>
</bodytube>"#;
        assert!(matches!(
            map(xml, Placement::default()),
            Err(LoadError::MissingRequiredField { ref field, .. }) if field == "radius"
        ));
    }

    #[test]
    fn test_inner_tube_nested_blocks() {
        let xml = r#"<innertube>
  <name>Motor mount</name>
  <length>0.07</length>
  <thickness>0.0005</thickness>
  <outerradius>0.0095</outerradius>
  <motormount>
    <ignitionevent>automatic</ignitionevent>
    <ignitiondelay>0.0</ignitiondelay>
    <overhang>0.005</overhang>
  </motormount>
</innertube>"#;
        let tube = map(xml, Placement::default()).unwrap();

        assert_relative_eq!(tube.diameter, 0.019);
        assert_eq!(tube.tags.len(), 1);
        assert_eq!(tube.tags[0].name, "motormount");
        assert_eq!(tube.tags[0].len(), 3);
        assert_eq!(tube.tags[0].get("overhang"), Some("0.005"));
    }

    #[test]
    fn test_freeform_finset_length() {
        let xml = r#"<freeformfinset>
  <name>Freeform</name>
  <fincount>4</fincount>
  <finpoints>
    <point x="0.0" y="0.0"/>
    <point x="0.02" y="0.03"/>
    <point x="0.06" y="0.0"/>
  </finpoints>
</freeformfinset>"#;
        let fins = map(xml, Placement::inside(0.02, 0.019)).unwrap();
        assert_relative_eq!(fins.length, 0.06);
        assert_eq!(fins.as_finset().unwrap().number_of_fins, 4);
        assert_eq!(fins.as_finset().unwrap().root_chord, None);
    }

    #[test]
    fn test_zero_fins() {
        let xml = r#"<trapezoidfinset><name>None</name><fincount>0</fincount><rootchord>0.05</rootchord></trapezoidfinset>"#;
        assert!(matches!(
            map(xml, Placement::inside(0.02, 0.019)),
            Err(LoadError::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_streamer_is_mass() {
        let xml = r#"<streamer>
  <name>Streamer</name>
  <color red="255" green="0" blue="0"/>
  <packedlength>0.025</packedlength>
  <packedradius>0.0125</packedradius>
  <striplength>0.5</striplength>
  <stripwidth>0.05</stripwidth>
  <material type="surface" density="0.08">Mylar</material>
</streamer>"#;
        let streamer = map(xml, Placement::default()).unwrap();

        assert!(matches!(streamer.kind, ComponentKind::Mass(_)));
        assert_eq!(streamer.color, Some(Color::new(255, 0, 0)));
        assert_relative_eq!(streamer.length, 0.025);
        assert_relative_eq!(streamer.diameter, 0.025);
        assert_relative_eq!(streamer.as_mass().unwrap().mass, 0.5 * 0.05 * 0.08);
    }

    #[test]
    fn test_parachute_override_mass() {
        let xml = r#"<parachute>
  <name>Chute</name>
  <overridemass>0.012</overridemass>
  <packedlength>0.04</packedlength>
  <packedradius>0.01</packedradius>
  <diameter>0.3</diameter>
  <material type="surface" density="0.067">Ripstop nylon</material>
</parachute>"#;
        let chute = map(xml, Placement::default()).unwrap();
        assert_relative_eq!(chute.as_mass().unwrap().mass, 0.012);
    }

    #[test]
    fn test_bad_color_channel() {
        let xml = NOSE.replace(r#"green="165""#, r#"green="300""#);
        assert!(matches!(
            map(&xml, Placement::default()),
            Err(LoadError::MissingRequiredField { ref element, ref field })
                if element == "color" && field == "green"
        ));
    }

    #[test]
    fn test_declared_edges() {
        let doc = parse_document(NOSE).unwrap();
        assert_eq!(declared_edges(doc.root_element()), (None, Some(0.025)));

        let doc = parse_document("<bodytube><radius>0.02</radius></bodytube>").unwrap();
        assert_eq!(declared_edges(doc.root_element()), (Some(0.02), Some(0.02)));

        let doc = parse_document("<bodytube><radius>auto</radius></bodytube>").unwrap();
        assert_eq!(declared_edges(doc.root_element()), (None, None));

        let doc = parse_document(
            "<transition><foreradius>0.02</foreradius><aftradius>auto</aftradius></transition>",
        )
        .unwrap();
        assert_eq!(declared_edges(doc.root_element()), (Some(0.02), None));
    }

    #[test]
    fn test_conical_nose_without_shape_parameter() {
        let xml = r#"<nosecone>
  <name>Nose</name>
  <length>0.1</length>
  <thickness>0.002</thickness>
  <shape>conical</shape>
  <aftradius>0.02</aftradius>
</nosecone>"#;
        let nose = map(xml, Placement::default()).unwrap();
        let fields = nose.as_nosecone().unwrap();

        assert_eq!(fields.shape, Noseshape::Conical);
        assert_eq!(fields.shape_parameter, 0.0);
        assert_relative_eq!(nose.diameter, 0.04);

        let xml = xml.replace("conical", "ellipsoid");
        let nose = map(&xml, Placement::default()).unwrap();
        assert_eq!(nose.as_nosecone().unwrap().shape, Noseshape::Ellipsoid);
    }

    #[test]
    fn test_ogive_requires_shape_parameter() {
        let xml = NOSE.replace("<shapeparameter>1.0</shapeparameter>", "");
        let err = map(&xml, Placement::default()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingRequiredField { ref field, .. } if field == "shapeparameter"
        ));
    }

    const MOTOR_MOUNT: &str = r#"<bodytube>
  <name>Body tube</name>
  <length>0.3</length>
  <thickness>0.001</thickness>
  <radius>0.025</radius>
  <subcomponents>
    <innertube>
      <name>Motor tube</name>
      <length>0.1</length>
      <thickness>0.0005</thickness>
      <outerradius>0.0095</outerradius>
      <subcomponents>
        <engineblock>
          <name>Engine block</name>
          <length>0.005</length>
          <outerradius>auto</outerradius>
          <thickness>0.002</thickness>
        </engineblock>
      </subcomponents>
    </innertube>
    <centeringring>
      <name>Ring</name>
      <length>0.003</length>
      <outerradius>auto</outerradius>
      <innerradius>auto</innerradius>
    </centeringring>
    <bulkhead>
      <name>Bulkhead</name>
      <length>0.01</length>
      <outerradius>auto</outerradius>
    </bulkhead>
  </subcomponents>
</bodytube>"#;

    #[test]
    fn test_rings_resolve_auto_radii() {
        let body = map(MOTOR_MOUNT, Placement::default()).unwrap();
        assert_eq!(body.component_count(), 5);

        let ring = body.find("Ring").unwrap();
        assert_relative_eq!(ring.diameter, 2.0 * 0.024);
        assert_relative_eq!(ring.as_body_tube().unwrap().thickness, 0.024 - 0.0095);
        assert_relative_eq!(ring.length, 0.003);

        let bulkhead = body.find("Bulkhead").unwrap();
        assert_relative_eq!(bulkhead.diameter, 2.0 * 0.024);
        assert_relative_eq!(bulkhead.as_body_tube().unwrap().thickness, 0.024);
    }

    #[test]
    fn test_engine_block_inside_inner_tube() {
        let body = map(MOTOR_MOUNT, Placement::default()).unwrap();
        let block = body.find("Engine block").unwrap();

        assert_relative_eq!(block.diameter, 2.0 * 0.009);
        assert_relative_eq!(block.as_body_tube().unwrap().thickness, 0.002);
        assert_eq!(block.as_body_tube().unwrap().component_mass, None);
    }

    #[test]
    fn test_ring_without_inner_tube() {
        let xml = r#"<centeringring>
  <name>Ring</name>
  <length>0.003</length>
  <outerradius>0.024</outerradius>
  <innerradius>auto</innerradius>
</centeringring>"#;
        assert!(matches!(
            map(xml, Placement::inside(0.025, 0.024)),
            Err(LoadError::MissingRequiredField { ref field, .. }) if field == "innerradius"
        ));

        let xml = xml.replace("<innerradius>auto</innerradius>", "<innerradius>0.03</innerradius>");
        assert!(matches!(
            map(&xml, Placement::inside(0.025, 0.024)),
            Err(LoadError::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_transition() {
        let xml = r#"<transition>
  <name>Boattail</name>
  <length>0.04</length>
  <thickness>0.002</thickness>
  <shape>conical</shape>
  <foreradius>auto</foreradius>
  <aftradius>0.015</aftradius>
  <foreshoulderlength>0.02</foreshoulderlength>
</transition>"#;
        let transition = map(xml, Placement::top_level(Some(0.025), None)).unwrap();
        let fields = transition.as_transition().unwrap();

        assert_eq!(transition.kind.type_name(), "Transition");
        assert_eq!(fields.shape, Noseshape::Conical);
        assert_eq!(fields.shape_parameter, 0.0);
        assert_relative_eq!(fields.fore_diameter, 0.05);
        assert_relative_eq!(fields.aft_diameter, 0.03);
        assert_relative_eq!(transition.diameter, 0.05);
        assert_eq!(transition.tags[0].get("foreshoulderlength"), Some("0.02"));
    }

    #[test]
    fn test_tube_finset() {
        let xml = r#"<tubefinset>
  <name>Tube fins</name>
  <fincount>6</fincount>
  <length>0.08</length>
  <outerradius>auto</outerradius>
  <thickness>0.0005</thickness>
</tubefinset>"#;
        let fins = map(xml, Placement::inside(0.02, 0.019)).unwrap();
        let fields = fins.as_finset().unwrap();

        assert_eq!(fields.number_of_fins, 6);
        assert_eq!(fields.span, None);
        assert_eq!(fields.thickness, Some(0.0005));
        assert_relative_eq!(fins.length, 0.08);
        assert_relative_eq!(fins.diameter, 0.04);

        let xml = xml.replace("<outerradius>auto</outerradius>", "<outerradius>0.01</outerradius>");
        let fins = map(&xml, Placement::inside(0.02, 0.019)).unwrap();
        assert_relative_eq!(fins.as_finset().unwrap().span.unwrap(), 0.02);
    }
}
