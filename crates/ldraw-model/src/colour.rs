// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Colour definitions and the colour table interface

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Alias from a `// LEGOID` comment preceding a colour definition
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColourAlias {
    pub id: u32,
    pub description: String,
}

/// One `!COLOUR` definition
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Colour {
    /// Colour code referenced by drawable lines
    pub code: i32,
    /// Name, e.g. `Black`
    pub name: String,
    /// Face colour, `#RRGGBB`
    pub value: String,
    /// Edge colour, `#RRGGBB` or a colour code
    pub edge: String,
    pub alpha: Option<u8>,
    pub luminance: Option<u8>,
    /// Material keyword and its parameters, e.g. `CHROME`
    pub material: Option<String>,
    pub aliases: Vec<ColourAlias>,
}

impl Colour {
    /// Create a plain opaque colour
    pub fn new(code: i32, name: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            code,
            name: name.into(),
            edge: value.clone(),
            value,
            alpha: None,
            luminance: None,
            material: None,
            aliases: Vec::new(),
        }
    }

    /// Set the edge colour
    pub fn with_edge(mut self, edge: impl Into<String>) -> Self {
        self.edge = edge.into();
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.alpha.is_some_and(|alpha| alpha < u8::MAX)
    }
}

/// Colour lookup by code
///
/// The table is loaded once and shared read-only between every parse,
/// including parallel sub-file resolution.
pub trait ColourTable: Send + Sync {
    /// Resolve a colour code
    ///
    /// # Returns
    /// The colour handle, or `None` if the table has no such code
    fn resolve(&self, code: i32) -> Option<Arc<Colour>>;
}

impl<T: ColourTable + ?Sized> ColourTable for Arc<T> {
    fn resolve(&self, code: i32) -> Option<Arc<Colour>> {
        (**self).resolve(code)
    }
}
