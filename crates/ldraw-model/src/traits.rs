// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Collaborator traits consumed by the parser

use crate::Result;
use std::sync::Arc;

/// Supplies the raw bytes of a named part
///
/// How names are located (library directories, archives, network) is left to
/// the implementation. The parser only sees bytes or a failure.
///
/// # Example
///
/// ```ignore
/// use ldraw_model::PartSource;
///
/// fn peek(source: &dyn PartSource) -> ldraw_model::Result<usize> {
///     let bytes = source.fetch("3001.dat")?;
///     Ok(bytes.len())
/// }
/// ```
pub trait PartSource: Send + Sync {
    /// Fetch the contents of a part
    ///
    /// # Arguments
    /// * `name` - Part name as referenced, with `/` separators
    ///
    /// # Returns
    /// The raw bytes, or `ParseError::FileNotFound` if the name is unknown
    fn fetch(&self, name: &str) -> Result<Vec<u8>>;
}

impl<T: PartSource + ?Sized> PartSource for Arc<T> {
    fn fetch(&self, name: &str) -> Result<Vec<u8>> {
        (**self).fetch(name)
    }
}
