// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Part sources: in-memory text and an LDraw library directory

use crate::cache::part_key;
use ldraw_model::{ParseError, PartSource, Result};
use rustc_hash::FxHashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Part texts held in memory
///
/// Lookups try the exact name first, then the normalized name.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    parts: FxHashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.parts.insert(name.into(), content.into());
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with_part(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(name, content);
        self
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl PartSource for MemorySource {
    fn fetch(&self, name: &str) -> Result<Vec<u8>> {
        if let Some(content) = self.parts.get(name) {
            return Ok(content.as_bytes().to_vec());
        }

        let key = part_key(name);
        self.parts
            .iter()
            .find(|(stored, _)| part_key(stored) == key)
            .map(|(_, content)| content.as_bytes().to_vec())
            .ok_or_else(|| ParseError::not_found(name))
    }
}

/// Library sub-directories searched, in order
const SEARCH_DIRS: &[&str] = &["p/48", "p", "parts/s", "parts", "models"];

/// Parts read from an LDraw library directory
///
/// A name that already points at an existing file is read directly. Other
/// names are looked up under the library root in `p/48`, `p`, `parts/s`,
/// `parts` and `models`, first as given and then lower-cased.
#[derive(Clone, Debug)]
pub struct LibrarySource {
    root: PathBuf,
}

impl LibrarySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a name resolves to, if any
    pub fn locate(&self, name: &str) -> Option<PathBuf> {
        let direct = Path::new(name);
        if direct.is_file() {
            return Some(direct.to_path_buf());
        }

        let lower = name.to_ascii_lowercase();
        let candidates = if lower == name {
            vec![name]
        } else {
            vec![name, lower.as_str()]
        };

        candidates.into_iter().find_map(|candidate| {
            SEARCH_DIRS
                .iter()
                .map(|dir| self.root.join(dir).join(candidate))
                .find(|path| path.is_file())
        })
    }
}

impl PartSource for LibrarySource {
    fn fetch(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.locate(name).ok_or_else(|| ParseError::not_found(name))?;
        log::trace!("Reading {} from {}", name, path.display());

        std::fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ParseError::not_found(name),
            _ => ParseError::Io(e),
        })
    }
}
