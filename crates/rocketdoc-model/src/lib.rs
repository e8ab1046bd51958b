// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RocketDoc Model - Unified document model for rocket designs and motors
//!
//! This crate defines one in-memory representation for model-rocket designs
//! and solid motor performance data, whatever file format they came from.
//! Loaders for concrete formats live in `rocketdoc-loader` and implement the
//! [`DocumentLoader`] trait defined here.
//!
//! # Architecture
//!
//! - [`Rocket`] → [`Stage`] → [`Component`] - the design tree
//! - [`Motor`] - header data plus [`ThrustSample`]s
//! - [`Performance`] - metrics derived from a thrust curve, shared by every
//!   motor loader
//! - [`LoadError`] - the error taxonomy for every load operation
//!
//! All physical quantities are SI: meters, kilograms, seconds, newtons.
//! Surface roughness is the one exception and is kept in micrometers.
//!
//! # Example
//!
//! ```ignore
//! use rocketdoc_model::{DocumentLoader, Motor};
//!
//! let motor: Motor = loader.load(path)?;
//! println!("{}: {:.1} N·s, Isp {:.0} s", motor.name, motor.i_total(), motor.isp());
//! ```

pub mod document;
pub mod error;
pub mod motor;
pub mod performance;
pub mod traits;

// Re-export all public types
pub use document::*;
pub use error::*;
pub use motor::*;
pub use performance::*;
pub use traits::*;
