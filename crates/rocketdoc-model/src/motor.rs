// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Solid rocket motor definition

use crate::{Performance, Result};
use serde::{Deserialize, Serialize};

/// One point of a thrust curve
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThrustSample {
    /// Time since ignition (s)
    pub time: f64,
    /// Thrust (N)
    pub thrust: f64,
    /// Instantaneous motor mass (kg), if the source records it
    pub mass: Option<f64>,
}

impl ThrustSample {
    pub fn new(time: f64, thrust: f64) -> Self {
        Self {
            time,
            thrust,
            mass: None,
        }
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = Some(mass);
        self
    }
}

/// Header data shared by every motor file format, already in SI units
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MotorHeader {
    pub name: String,
    pub manufacturer: String,
    pub comments: String,
    /// Diameter (m)
    pub diameter: f64,
    /// Length (m)
    pub length: f64,
    /// Available ejection delays (s)
    pub delays: Vec<f64>,
    /// Total loaded mass (kg)
    pub m_init: f64,
    /// Propellant mass (kg)
    pub m_prop: f64,
}

/// A motor with its thrust curve and derived performance
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Motor {
    pub name: String,
    pub manufacturer: String,
    /// Free-text notes from the source file
    pub comments: String,
    /// Diameter (m)
    pub diameter: f64,
    /// Length (m)
    pub length: f64,
    /// Available ejection delays (s)
    pub delays: Vec<f64>,
    /// Total loaded mass (kg)
    pub m_init: f64,
    /// Propellant mass (kg)
    pub m_prop: f64,
    /// Thrust samples in file order
    pub thrustcurve: Vec<ThrustSample>,
    /// Metrics derived from `thrustcurve`, `m_prop` and `m_init`
    pub performance: Performance,
}

impl Motor {
    /// Assemble a motor, deriving its performance from the samples
    pub fn new(header: MotorHeader, thrustcurve: Vec<ThrustSample>) -> Result<Self> {
        let performance = Performance::compute(header.m_prop, header.m_init, &thrustcurve)?;
        Ok(Self {
            name: header.name,
            manufacturer: header.manufacturer,
            comments: header.comments,
            diameter: header.diameter,
            length: header.length,
            delays: header.delays,
            m_init: header.m_init,
            m_prop: header.m_prop,
            thrustcurve,
            performance,
        })
    }

    /// Burn time (s)
    pub fn t_burn(&self) -> f64 {
        self.performance.t_burn
    }

    /// Average thrust (N)
    pub fn thrust_avg(&self) -> f64 {
        self.performance.thrust_avg
    }

    /// Peak thrust (N)
    pub fn thrust_peak(&self) -> f64 {
        self.performance.thrust_peak
    }

    /// Total impulse (N·s)
    pub fn i_total(&self) -> f64 {
        self.performance.i_total
    }

    /// Specific impulse (s)
    pub fn isp(&self) -> f64 {
        self.performance.isp
    }

    /// Propellant mass fraction (%)
    pub fn m_frac(&self) -> f64 {
        self.performance.m_frac
    }

    /// Designation such as `F10-4`, using the shortest delay when present
    pub fn designation(&self) -> String {
        let shortest = self.delays.iter().copied().fold(None, |acc: Option<f64>, d| {
            Some(acc.map_or(d, |a| a.min(d)))
        });
        match shortest {
            Some(delay) => format!("{}-{}", self.name, delay),
            None => self.name.clone(),
        }
    }
}
