// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Derived motor performance metrics
//!
//! Both motor loaders hand their samples to [`Performance::compute`], so a
//! motor yields the same numbers whichever file format it came from.

use crate::{LoadError, Result, ThrustSample};
use serde::{Deserialize, Serialize};

/// Standard gravity (m/s²)
pub const G0: f64 = 9.80665;

/// Performance scalars derived from a thrust curve and the motor masses
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Performance {
    /// Burn time (s): time of the last sample
    pub t_burn: f64,
    /// Average thrust (N): `i_total / t_burn`
    pub thrust_avg: f64,
    /// Peak thrust (N)
    pub thrust_peak: f64,
    /// Total impulse (N·s), trapezoidal
    pub i_total: f64,
    /// Specific impulse (s)
    pub isp: f64,
    /// Propellant mass fraction (%)
    pub m_frac: f64,
}

impl Performance {
    /// Derive performance from propellant mass, loaded mass and samples
    ///
    /// Samples must be strictly increasing in time, start at or after `t = 0`
    /// and carry non-negative thrust. When the first sample is after `t = 0`
    /// the curve is integrated from an implicit `(0, 0)` ignition point; the
    /// samples themselves are not modified.
    pub fn compute(m_prop: f64, m_init: f64, samples: &[ThrustSample]) -> Result<Self> {
        if samples.len() < 2 {
            return Err(LoadError::InsufficientSampleData(samples.len()));
        }
        validate_curve(samples)?;
        if !(m_prop > 0.0 && m_init > 0.0 && m_prop.is_finite() && m_init.is_finite()) {
            return Err(LoadError::InvalidMassData { m_prop, m_init });
        }

        let origin = (samples[0].time > 0.0).then(|| ThrustSample::new(0.0, 0.0));
        let points: Vec<&ThrustSample> = origin.iter().chain(samples.iter()).collect();

        let i_total = points
            .windows(2)
            .map(|pair| (pair[1].time - pair[0].time) * (pair[0].thrust + pair[1].thrust) / 2.0)
            .sum::<f64>();

        let thrust_peak = samples
            .iter()
            .map(|s| s.thrust)
            .fold(f64::NEG_INFINITY, f64::max);

        // Checked above: at least two samples
        let t_burn = samples[samples.len() - 1].time;

        Ok(Self {
            t_burn,
            thrust_avg: i_total / t_burn,
            thrust_peak,
            i_total,
            isp: i_total / (m_prop * G0),
            m_frac: (m_prop / m_init) * 100.0,
        })
    }

    /// NAR impulse class letter for the total impulse
    ///
    /// Class A tops out at 2.5 N·s and each following letter doubles it.
    pub fn impulse_class(&self) -> String {
        if self.i_total <= 0.625 {
            return "1/4A".to_string();
        }
        if self.i_total <= 1.25 {
            return "1/2A".to_string();
        }
        let mut upper = 2.5;
        let mut letter = b'A';
        while self.i_total > upper && letter < b'Z' {
            upper *= 2.0;
            letter += 1;
        }
        char::from(letter).to_string()
    }
}

fn validate_curve(samples: &[ThrustSample]) -> Result<()> {
    for (index, sample) in samples.iter().enumerate() {
        if !sample.time.is_finite() || sample.time < 0.0 {
            return Err(LoadError::thrust_curve(format!(
                "sample {} has invalid time {}",
                index, sample.time
            )));
        }
        if !sample.thrust.is_finite() || sample.thrust < 0.0 {
            return Err(LoadError::thrust_curve(format!(
                "sample {} has invalid thrust {}",
                index, sample.thrust
            )));
        }
    }
    for (index, pair) in samples.windows(2).enumerate() {
        if pair[1].time <= pair[0].time {
            return Err(LoadError::thrust_curve(format!(
                "time does not increase between samples {} ({} s) and {} ({} s)",
                index,
                pair[0].time,
                index + 1,
                pair[1].time
            )));
        }
    }
    Ok(())
}
