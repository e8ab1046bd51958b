// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Unit conversion to SI
//!
//! OpenRocket files are already SI. RockSim motor files use millimeters and
//! grams, RASP files millimeters and kilograms.

use rocketdoc_model::{LoadError, Result};

/// Surface roughness (µm) for an OpenRocket finish keyword
///
/// ROUGH 500, UNFINISHED 150, NORMAL 60, SMOOTH 20, POLISHED 2, MIRROR 0.
pub fn finish_roughness(finish: &str) -> Result<f64> {
    match finish.trim().to_lowercase().as_str() {
        "rough" => Ok(500.0),
        "unfinished" => Ok(150.0),
        "normal" => Ok(60.0),
        "smooth" => Ok(20.0),
        "polished" => Ok(2.0),
        "mirror" => Ok(0.0),
        _ => Err(LoadError::invalid_enum("finish", finish)),
    }
}

/// Millimeters to meters
pub fn mm(value: f64) -> f64 {
    value * scales::MILLIMETRE
}

/// Grams to kilograms
pub fn grams(value: f64) -> f64 {
    value * scales::GRAM
}

/// Scale factors to SI
pub mod scales {
    /// Millimeters to meters
    pub const MILLIMETRE: f64 = 0.001;
    /// Grams to kilograms
    pub const GRAM: f64 = 0.001;
}
