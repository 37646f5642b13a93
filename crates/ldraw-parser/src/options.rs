// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parser settings

use ldraw_model::{ParseError, Result};
use serde::{Deserialize, Serialize};

/// Settings controlling how parts and their sub-files are loaded
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Deepest sub-file nesting accepted, counting the top-level part as 1
    pub max_depth: usize,
    /// Share parsed sub-parts between references to the same name
    pub cache_parts: bool,
    /// Resolve sibling sub-file references on the rayon thread pool
    pub parallel: bool,
    /// Fail parts whose header has no title line
    pub require_title: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: 64,
            cache_parts: false,
            parallel: false,
            require_title: false,
        }
    }
}

impl ParseOptions {
    /// Read options from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ParseError::InvalidOptions(e.to_string()))
    }
}
