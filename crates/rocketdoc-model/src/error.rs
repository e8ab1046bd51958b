// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for loading rocket designs and motor files

use thiserror::Error;

/// Result type alias for loader operations
pub type Result<T> = std::result::Result<T, LoadError>;

/// Errors that can occur while loading a design or motor file
///
/// Every failure is scoped to a single load call. No partial model is ever
/// returned alongside an error.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Container unreadable or primary entry missing
    #[error("Malformed archive: {0}")]
    MalformedArchive(String),

    /// Markup could not be parsed or lacks its structural elements
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// Plain-text motor header line is unusable
    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    /// Thrust samples are unparseable, out of order or negative
    #[error("Malformed thrust curve: {0}")]
    MalformedThrustCurve(String),

    /// A field the element requires is absent or unreadable
    #[error("Missing required field '{field}' on <{element}>")]
    MissingRequiredField { element: String, field: String },

    /// An enumerated field holds an unrecognized value
    #[error("Invalid value '{value}' for {field}")]
    InvalidEnumValue { field: String, value: String },

    /// Element identity has no entry in the component table
    #[error("Unknown component type <{0}>")]
    UnknownComponentType(String),

    /// Propellant or loaded mass is not strictly positive
    #[error("Invalid mass data: propellant {m_prop} kg, loaded {m_init} kg")]
    InvalidMassData { m_prop: f64, m_init: f64 },

    /// Too few thrust samples to integrate
    #[error("Insufficient thrust samples: {0} (need at least 2)")]
    InsufficientSampleData(usize),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoadError {
    /// Create a malformed archive error
    pub fn archive(msg: impl Into<String>) -> Self {
        LoadError::MalformedArchive(msg.into())
    }

    /// Create a malformed document error
    pub fn document(msg: impl Into<String>) -> Self {
        LoadError::MalformedDocument(msg.into())
    }

    /// Create a malformed header error
    pub fn header(msg: impl Into<String>) -> Self {
        LoadError::MalformedHeader(msg.into())
    }

    /// Create a malformed thrust curve error
    pub fn thrust_curve(msg: impl Into<String>) -> Self {
        LoadError::MalformedThrustCurve(msg.into())
    }

    /// Create a missing field error
    pub fn missing(element: impl Into<String>, field: impl Into<String>) -> Self {
        LoadError::MissingRequiredField {
            element: element.into(),
            field: field.into(),
        }
    }

    /// Create an invalid enum value error
    pub fn invalid_enum(field: impl Into<String>, value: impl Into<String>) -> Self {
        LoadError::InvalidEnumValue {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create an unknown component error
    pub fn unknown_component(identity: impl Into<String>) -> Self {
        LoadError::UnknownComponentType(identity.into())
    }
}
