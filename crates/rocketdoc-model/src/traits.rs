// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core loader trait
//!
//! A loader turns one file of a known format into a root entity of the
//! document model. Format detection is the caller's job.

use crate::Result;
use std::path::Path;

/// Entry point for loading a file into the document model
///
/// Implementations are stateless between calls, so one loader value can be
/// shared across threads and used on distinct paths concurrently.
///
/// # Example
///
/// ```ignore
/// use rocketdoc_model::DocumentLoader;
///
/// let loader: &dyn DocumentLoader<Output = Rocket> = &OrkLoader::new();
/// let rocket = loader.load(Path::new("design.ork"))?;
/// println!("{} stages", rocket.stages.len());
/// ```
pub trait DocumentLoader: Send + Sync {
    /// Root entity produced by this loader
    type Output;

    /// Load from a file path
    ///
    /// The default implementation reads the whole file and hands it to
    /// [`DocumentLoader::load_bytes`]; the file handle is released before
    /// parsing starts.
    fn load(&self, path: &Path) -> Result<Self::Output> {
        let bytes = std::fs::read(path)?;
        self.load_bytes(&bytes)
    }

    /// Load from in-memory file content
    fn load_bytes(&self, bytes: &[u8]) -> Result<Self::Output>;
}
