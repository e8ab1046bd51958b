// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RockSim `.rse` motor loader
//!
//! RockSim engine files are XML. Header data are attributes of `<engine>`,
//! lengths in millimeters and masses in grams:
//!
//! ```text
//! <engine-database>
//!   <engine-list>
//!     <engine code="F10" mfg="Apogee" dia="29." len="93." initWt="84.1" propWt="40.7" delays="4,6,8">
//!       <comments>…</comments>
//!       <data>
//!         <eng-data t="0." f="0." m="40.7" cg="46.5"/>
//!         …
//!       </data>
//!     </engine>
//!   </engine-list>
//! </engine-database>
//! ```

use crate::markup::{attr_f64, child, elements, optional_attr_f64, parse_document, parse_f64};
use crate::units::{grams, mm};
use log::debug;
use rocketdoc_model::{DocumentLoader, LoadError, Motor, MotorHeader, Result, ThrustSample};
use roxmltree::Node;

/// Loader for RockSim `.rse` engine files
#[derive(Clone, Debug, Default)]
pub struct RseLoader {
    /// Which `<engine>` to load from a multi-engine file
    pub engine_index: usize,
}

impl RseLoader {
    /// Create a loader for the first engine in a file
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the engine at `index` (document order) instead of the first
    pub fn with_engine_index(mut self, index: usize) -> Self {
        self.engine_index = index;
        self
    }

    /// Build a motor from the engine file text
    pub fn parse_document(&self, text: &str) -> Result<Motor> {
        let doc = parse_document(text)?;
        let engines: Vec<Node> = doc
            .descendants()
            .filter(|n| n.has_tag_name("engine"))
            .collect();
        if engines.len() > 1 {
            debug!(
                "engine file holds {} engines, loading index {}",
                engines.len(),
                self.engine_index
            );
        }
        let engine = engines.get(self.engine_index).copied().ok_or_else(|| {
            LoadError::document(format!(
                "no <engine> at index {} ({} found)",
                self.engine_index,
                engines.len()
            ))
        })?;

        let header = parse_header(engine)?;
        let samples = parse_samples(engine)?;
        debug!(
            "engine '{}' by {}: {} samples",
            header.name,
            header.manufacturer,
            samples.len()
        );
        Motor::new(header, samples)
    }
}

impl DocumentLoader for RseLoader {
    type Output = Motor;

    fn load_bytes(&self, bytes: &[u8]) -> Result<Motor> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| LoadError::document(format!("engine file is not UTF-8: {}", e)))?;
        self.parse_document(text)
    }
}

fn required_attr<'a>(engine: Node<'a, '_>, name: &str) -> Result<&'a str> {
    engine
        .attribute(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| LoadError::missing("engine", name))
}

fn parse_header(engine: Node<'_, '_>) -> Result<MotorHeader> {
    let comments = child(engine, "comments")
        .and_then(|c| c.text())
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    Ok(MotorHeader {
        name: required_attr(engine, "code")?.to_string(),
        manufacturer: required_attr(engine, "mfg")?.to_string(),
        comments,
        diameter: mm(attr_f64(engine, "dia")?),
        length: mm(attr_f64(engine, "len")?),
        delays: parse_delays(engine.attribute("delays").unwrap_or_default())?,
        m_init: grams(attr_f64(engine, "initWt")?),
        m_prop: grams(attr_f64(engine, "propWt")?),
    })
}

/// Comma-separated delay list; `P` (plugged) entries are skipped
fn parse_delays(list: &str) -> Result<Vec<f64>> {
    list.split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty() && !d.eq_ignore_ascii_case("p"))
        .map(|d| parse_f64(d).ok_or_else(|| LoadError::missing("engine", "delays")))
        .collect()
}

fn parse_samples(engine: Node<'_, '_>) -> Result<Vec<ThrustSample>> {
    let Some(data) = child(engine, "data") else {
        return Ok(Vec::new());
    };
    elements(data)
        .filter(|n| n.has_tag_name("eng-data"))
        .enumerate()
        .map(|(index, point)| {
            let time = attr_f64(point, "t").map_err(|_| sample_error(index, "t"))?;
            let thrust = attr_f64(point, "f").map_err(|_| sample_error(index, "f"))?;
            let mass = optional_attr_f64(point, "m").map_err(|_| sample_error(index, "m"))?;
            let sample = ThrustSample::new(time, thrust);
            Ok(match mass {
                Some(m) => sample.with_mass(grams(m)),
                None => sample,
            })
        })
        .collect()
}

fn sample_error(index: usize, attribute: &str) -> LoadError {
    LoadError::thrust_curve(format!(
        "<eng-data> {} has no readable '{}'",
        index, attribute
    ))
}
