// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RocketDoc Loader - OpenRocket, RockSim and RASP file loaders
//!
//! This crate reads model-rocket design and motor files into the unified
//! model defined in `rocketdoc-model`. Every loader implements the
//! [`DocumentLoader`] trait.
//!
//! # Formats
//!
//! - **`.ork`** - OpenRocket designs: a zip archive holding an XML document,
//!   mapped into a [`Rocket`] through a component registry
//! - **`.rse`** - RockSim engine files (XML, millimeters and grams)
//! - **`.eng`** - RASP engine files (plain text, parsed with `nom`)
//!
//! Both motor formats share one metrics engine, so the same motor gives the
//! same [`Performance`](rocketdoc_model::Performance) in either format.
//!
//! # Example
//!
//! ```ignore
//! use rocketdoc_loader::{load_ork, load_rse, RseLoader};
//! use rocketdoc_model::DocumentLoader;
//!
//! let rocket = load_ork("design.ork")?;
//! println!("{}: {} components", rocket.name, rocket.component_count());
//!
//! let motor = RseLoader::new().with_engine_index(1).load(path)?;
//! println!("{} Isp {:.0} s", motor.designation(), motor.isp());
//! ```

mod archive;
mod eng;
mod mapper;
mod markup;
mod ork;
mod registry;
mod rse;
mod units;

pub use eng::EngLoader;
pub use mapper::PASSTHROUGH_BLOCK;
pub use ork::{OrkLoader, DEFAULT_ENTRY_NAME};
pub use registry::{ComponentType, COMMON_FIELDS};
pub use rse::RseLoader;
pub use units::finish_roughness;

use rocketdoc_model::{DocumentLoader, Motor, Result, Rocket};
use std::path::Path;

/// Load an OpenRocket design with default settings
pub fn load_ork(path: impl AsRef<Path>) -> Result<Rocket> {
    OrkLoader::new().load(path.as_ref())
}

/// Load the first engine of a RockSim engine file
pub fn load_rse(path: impl AsRef<Path>) -> Result<Motor> {
    RseLoader::new().load(path.as_ref())
}

/// Load a RASP engine file
pub fn load_eng(path: impl AsRef<Path>) -> Result<Motor> {
    EngLoader::new().load(path.as_ref())
}
