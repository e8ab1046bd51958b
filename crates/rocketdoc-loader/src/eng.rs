// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RASP `.eng` motor loader
//!
//! A line-oriented format: comment lines start with `;`, the first other
//! line is the header, and every following non-blank line is a
//! `time thrust` pair.
//!
//! ```text
//! ; comments…
//! F10 29 93 4-6-8 0.0407 0.0841 Apogee
//! 0.015 28.22
//! …
//! 7.13 0.0
//! ```
//!
//! Header fields: name, diameter (mm), length (mm), dash-separated delays,
//! propellant mass (kg), loaded mass (kg), manufacturer.

use crate::units::mm;
use log::debug;
use nom::{
    branch::alt,
    character::complete::{char, digit0, digit1, one_of, space0, space1},
    combinator::{all_consuming, map_res, opt, recognize},
    sequence::pair,
    IResult, Parser,
};
use rocketdoc_model::{DocumentLoader, LoadError, Motor, MotorHeader, Result, ThrustSample};

/// Loader for RASP `.eng` motor files
#[derive(Clone, Debug)]
pub struct EngLoader {
    /// Character that starts a comment line
    pub comment_marker: char,
}

impl Default for EngLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl EngLoader {
    /// Create a loader using `;` comments
    pub fn new() -> Self {
        Self {
            comment_marker: ';',
        }
    }

    /// Use a different comment marker
    pub fn with_comment_marker(mut self, marker: char) -> Self {
        self.comment_marker = marker;
        self
    }

    /// Build a motor from the file text
    pub fn parse_str(&self, text: &str) -> Result<Motor> {
        let mut comments = String::new();
        let mut header: Option<MotorHeader> = None;
        let mut samples = Vec::new();

        for (index, line) in text.lines().enumerate() {
            if line.trim_start().starts_with(self.comment_marker) {
                comments.push_str(line);
                comments.push('\n');
                continue;
            }
            if line.trim().is_empty() {
                continue;
            }
            match header {
                None => header = Some(parse_header(line)?),
                Some(_) => samples.push(parse_sample(line, index + 1)?),
            }
        }

        let mut header =
            header.ok_or_else(|| LoadError::header("file has no header line"))?;
        header.comments = comments;
        debug!(
            "motor '{}' by {}: {} samples",
            header.name,
            header.manufacturer,
            samples.len()
        );
        Motor::new(header, samples)
    }
}

impl DocumentLoader for EngLoader {
    type Output = Motor;

    fn load_bytes(&self, bytes: &[u8]) -> Result<Motor> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| LoadError::header(format!("motor file is not UTF-8: {}", e)))?;
        self.parse_str(text)
    }
}

// ============================================================================
// Parsing Primitives
// ============================================================================

/// Parse a decimal number (`7`, `7.`, `.5`, `-1.5e-3`)
fn number(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize((
            opt(one_of("+-")),
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit0)))),
                recognize(pair(char('.'), digit1)),
            )),
            opt((one_of("eE"), opt(one_of("+-")), digit1)),
        )),
        |s: &str| lexical_core::parse::<f64>(s.as_bytes()),
    )
    .parse(input)
}

/// Parse a `time thrust` row
fn sample_row(input: &str) -> IResult<&str, (f64, f64)> {
    let (input, (_, time, _, thrust, _)) =
        all_consuming((space0, number, space1, number, space0)).parse(input)?;
    Ok((input, (time, thrust)))
}

/// Parse a whole token as a number
fn number_token(token: &str) -> Option<f64> {
    all_consuming(number).parse(token).ok().map(|(_, n)| n)
}

fn parse_header(line: &str) -> Result<MotorHeader> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 7 {
        return Err(LoadError::header(format!(
            "expected 7 fields, found {} in '{}'",
            tokens.len(),
            line.trim()
        )));
    }
    let field = |index: usize, what: &str| {
        number_token(tokens[index])
            .ok_or_else(|| LoadError::header(format!("{} '{}' is not a number", what, tokens[index])))
    };

    Ok(MotorHeader {
        name: tokens[0].to_string(),
        manufacturer: tokens[6..].join(" "),
        comments: String::new(),
        diameter: mm(field(1, "diameter")?),
        length: mm(field(2, "length")?),
        delays: parse_delays(tokens[3])?,
        m_prop: field(4, "propellant weight")?,
        m_init: field(5, "total weight")?,
    })
}

/// Dash-separated delay list; `P` (plugged) entries are skipped
fn parse_delays(list: &str) -> Result<Vec<f64>> {
    list.split('-')
        .filter(|d| !d.is_empty() && !d.eq_ignore_ascii_case("p"))
        .map(|d| {
            number_token(d).ok_or_else(|| LoadError::header(format!("delay list '{}'", list)))
        })
        .collect()
}

fn parse_sample(line: &str, line_number: usize) -> Result<ThrustSample> {
    let (_, (time, thrust)) = sample_row(line).map_err(|_| {
        LoadError::thrust_curve(format!(
            "line {}: expected 'time thrust', found '{}'",
            line_number,
            line.trim()
        ))
    })?;
    Ok(ThrustSample::new(time, thrust))
}
