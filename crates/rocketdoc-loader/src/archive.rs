// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Compressed container access

use rocketdoc_model::{LoadError, Result};
use std::io::{Read, Seek};
use zip::result::ZipError;
use zip::ZipArchive;

/// Upper bound on the buffer reserved from an entry's declared size
const MAX_PREALLOCATION: u64 = 1 << 20;

/// Read one named entry of a zip container as UTF-8 text
///
/// The archive handle lives only for this call.
pub fn read_entry<R: Read + Seek>(reader: R, entry_name: &str) -> Result<String> {
    let mut archive = ZipArchive::new(reader).map_err(|e| archive_error(e, entry_name))?;
    let mut entry = archive
        .by_name(entry_name)
        .map_err(|e| archive_error(e, entry_name))?;

    // Declared sizes are untrusted; the read itself grows the buffer
    let capacity = entry.size().min(MAX_PREALLOCATION) as usize;
    let mut text = String::with_capacity(capacity);
    entry
        .read_to_string(&mut text)
        .map_err(|e| LoadError::archive(format!("cannot read entry '{}': {}", entry_name, e)))?;
    Ok(text)
}

fn archive_error(err: ZipError, entry_name: &str) -> LoadError {
    match err {
        ZipError::FileNotFound => {
            LoadError::archive(format!("primary entry '{}' not found", entry_name))
        }
        other => LoadError::archive(other.to_string()),
    }
}
