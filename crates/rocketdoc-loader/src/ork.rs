// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! OpenRocket design loader
//!
//! An `.ork` file is a zip archive whose primary entry is an XML document:
//!
//! ```text
//! <openrocket>
//!   <rocket>
//!     <name>…</name>
//!     <subcomponents>
//!       <stage>
//!         <name>…</name>
//!         <subcomponents> component elements… </subcomponents>
//!       </stage>
//!     </subcomponents>
//!   </rocket>
//! </openrocket>
//! ```

use crate::archive::read_entry;
use crate::mapper::{declared_edges, map_component, Placement};
use crate::markup::{child, elements, parse_document, required_text, tag};
use log::debug;
use rocketdoc_model::{DocumentLoader, LoadError, Result, Rocket, Stage};
use roxmltree::Node;
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;

/// Name of the primary markup entry inside an `.ork` archive
pub const DEFAULT_ENTRY_NAME: &str = "rocket.ork";

/// Loader for OpenRocket `.ork` design archives
#[derive(Clone, Debug)]
pub struct OrkLoader {
    /// Archive entry holding the design document
    pub entry_name: String,
}

impl Default for OrkLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl OrkLoader {
    /// Create a loader reading the standard entry
    pub fn new() -> Self {
        Self {
            entry_name: DEFAULT_ENTRY_NAME.to_string(),
        }
    }

    /// Read the design from a differently named entry
    pub fn with_entry_name(mut self, entry_name: impl Into<String>) -> Self {
        self.entry_name = entry_name.into();
        self
    }

    /// Build a rocket from the design document text
    pub fn parse_document(&self, text: &str) -> Result<Rocket> {
        let doc = parse_document(text)?;
        let root = doc.root_element();
        if tag(root) != "openrocket" {
            return Err(LoadError::document(format!(
                "expected <openrocket> root, found <{}>",
                tag(root)
            )));
        }
        let rocket = child(root, "rocket")
            .ok_or_else(|| LoadError::document("missing <rocket> element"))?;
        let name = required_text(rocket, "name")?;

        let stages = match child(rocket, "subcomponents") {
            Some(list) => elements(list).map(map_stage).collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };

        debug!(
            "loaded rocket '{}': {} stages, {} components",
            name,
            stages.len(),
            stages.iter().map(Stage::component_count).sum::<usize>()
        );
        Ok(Rocket::new(name, stages))
    }
}

impl DocumentLoader for OrkLoader {
    type Output = Rocket;

    fn load(&self, path: &Path) -> Result<Rocket> {
        debug!("loading design {}", path.display());
        let file = File::open(path)
            .map_err(|e| LoadError::archive(format!("cannot open {}: {}", path.display(), e)))?;
        let text = read_entry(BufReader::new(file), &self.entry_name)?;
        self.parse_document(&text)
    }

    fn load_bytes(&self, bytes: &[u8]) -> Result<Rocket> {
        let text = read_entry(Cursor::new(bytes), &self.entry_name)?;
        self.parse_document(&text)
    }
}

fn map_stage(node: Node<'_, '_>) -> Result<Stage> {
    if tag(node) != "stage" {
        return Err(LoadError::unknown_component(tag(node)));
    }
    let name = required_text(node, "name")?;

    let components: Vec<Node> = match child(node, "subcomponents") {
        Some(list) => elements(list).collect(),
        None => Vec::new(),
    };
    let edges: Vec<(Option<f64>, Option<f64>)> =
        components.iter().map(|c| declared_edges(*c)).collect();

    let components = components
        .iter()
        .enumerate()
        .map(|(index, component)| {
            let (fore, aft) = neighbour_radii(&edges, index);
            map_component(*component, Placement::top_level(fore, aft))
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("stage '{}': {} top-level components", name, components.len());
    Ok(Stage::new(name, components))
}

/// Nearest explicit radii among stage siblings
///
/// Forward: the aft edge of the closest earlier sibling that declares one.
/// Aft: the forward edge of the closest later sibling.
fn neighbour_radii(
    edges: &[(Option<f64>, Option<f64>)],
    index: usize,
) -> (Option<f64>, Option<f64>) {
    let fore = edges[..index].iter().rev().find_map(|(_, aft)| *aft);
    let aft = edges[index + 1..].iter().find_map(|(fore, _)| *fore);
    (fore, aft)
}
