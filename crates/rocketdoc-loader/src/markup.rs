// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed accessors over a generic markup tree
//!
//! Thin helpers on top of `roxmltree` nodes. A field that is present but
//! cannot be read as the requested type counts as missing.

use rocketdoc_model::{LoadError, Result};
use roxmltree::{Document, Node};

/// Parse markup text into a tree
pub fn parse_document(text: &str) -> Result<Document<'_>> {
    Document::parse(text).map_err(|e| LoadError::document(e.to_string()))
}

/// Element children in document order
pub fn elements<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|n| n.is_element())
}

/// First element child with the given tag
pub fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    elements(node).find(|n| n.has_tag_name(name))
}

/// Whether the element has no element children
pub fn is_leaf(node: Node<'_, '_>) -> bool {
    elements(node).next().is_none()
}

/// Element tag name
pub fn tag<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Trimmed text of a child element, if present and non-empty
pub fn child_text<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    child(node, name)
        .and_then(|c| c.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Trimmed text of a child element that must be present
pub fn required_text<'a>(node: Node<'a, '_>, name: &str) -> Result<&'a str> {
    child_text(node, name).ok_or_else(|| LoadError::missing(tag(node), name))
}

/// Parse a float the way the source formats write them (`29.`, `0.15`, `1e-3`)
pub fn parse_f64(text: &str) -> Option<f64> {
    lexical_core::parse::<f64>(text.trim().as_bytes()).ok()
}

/// Float content of a child element that must be present
pub fn required_f64(node: Node<'_, '_>, name: &str) -> Result<f64> {
    required_text(node, name)
        .ok()
        .and_then(parse_f64)
        .ok_or_else(|| LoadError::missing(tag(node), name))
}

/// Float content of an optional child element
///
/// Absent yields `None`; present but unreadable is an error.
pub fn optional_f64(node: Node<'_, '_>, name: &str) -> Result<Option<f64>> {
    match child_text(node, name) {
        None => Ok(None),
        Some(text) => parse_f64(text)
            .map(Some)
            .ok_or_else(|| LoadError::missing(tag(node), name)),
    }
}

/// Float value of an attribute that must be present
pub fn attr_f64(node: Node<'_, '_>, name: &str) -> Result<f64> {
    node.attribute(name)
        .and_then(parse_f64)
        .ok_or_else(|| LoadError::missing(tag(node), name))
}

/// Float value of an optional attribute
pub fn optional_attr_f64(node: Node<'_, '_>, name: &str) -> Result<Option<f64>> {
    match node.attribute(name) {
        None => Ok(None),
        Some(text) => parse_f64(text)
            .map(Some)
            .ok_or_else(|| LoadError::missing(tag(node), name)),
    }
}

/// Unsigned integer content of a child element that must be present
pub fn required_u32(node: Node<'_, '_>, name: &str) -> Result<u32> {
    required_text(node, name)
        .ok()
        .and_then(|t| lexical_core::parse::<u32>(t.as_bytes()).ok())
        .ok_or_else(|| LoadError::missing(tag(node), name))
}

#[cfg(test)]
mod tests {
    use super::*;

    const XML: &str = r#"<part kind="demo">
  <name> Body tube </name>
  <length>0.3</length>
  <radius>auto</radius>
  <count>3</count>
  <empty/>
  <sample t="0." f="28.22"/>
</part>"#;

    #[test]
    fn test_child_access() {
        let doc = parse_document(XML).unwrap();
        let root = doc.root_element();

        assert_eq!(tag(root), "part");
        assert_eq!(child_text(root, "name"), Some("Body tube"));
        assert_eq!(child_text(root, "empty"), None);
        assert!(child(root, "empty").is_some());
        assert_eq!(elements(root).count(), 6);
        assert!(!is_leaf(root));
        assert!(is_leaf(child(root, "length").unwrap()));
    }

    #[test]
    fn test_numbers() {
        let doc = parse_document(XML).unwrap();
        let root = doc.root_element();

        assert_eq!(required_f64(root, "length").unwrap(), 0.3);
        assert_eq!(required_u32(root, "count").unwrap(), 3);
        assert_eq!(optional_f64(root, "missing").unwrap(), None);
        assert!(matches!(
            required_f64(root, "radius"),
            Err(LoadError::MissingRequiredField { ref field, .. }) if field == "radius"
        ));
        assert!(optional_f64(root, "radius").is_err());

        let sample = child(root, "sample").unwrap();
        assert_eq!(attr_f64(sample, "t").unwrap(), 0.0);
        assert_eq!(attr_f64(sample, "f").unwrap(), 28.22);
        assert_eq!(optional_attr_f64(sample, "m").unwrap(), None);
    }

    #[test]
    fn test_parse_error() {
        let err = parse_document("<open><unclosed></open>").unwrap_err();
        assert!(matches!(err, LoadError::MalformedDocument(_)));
    }
}
