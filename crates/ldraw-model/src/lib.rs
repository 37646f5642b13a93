// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! LDraw Model - Command tree and shared types for LDraw part parsing
//!
//! This crate provides the data model produced by parsing LDraw part files,
//! the collaborator traits a parser consumes, and the winding transforms that
//! operate on parsed parts.
//!
//! # Architecture
//!
//! - [`Part`] - Header metadata plus an ordered [`Command`] sequence
//! - [`Command`] - Comment, sub-file reference, line, triangle or quad
//! - [`PartSource`] - Supplies raw bytes for a part name
//! - [`ColourTable`] - Resolves colour codes to [`Colour`] handles
//! - [`bake`] / [`invert`] - Winding normalization
//!
//! # Example
//!
//! ```ignore
//! use ldraw_model::{Part, Winding};
//!
//! let part: Part = parse_somehow()?;
//! let normalized = part.conformed_to(Winding::CounterClockWise);
//! println!("{} drawables", normalized.drawable_count());
//! ```

pub mod colour;
pub mod command;
pub mod error;
pub mod part;
pub mod traits;
pub mod types;
pub mod winding;

// Re-export all public types
pub use colour::*;
pub use command::*;
pub use error::*;
pub use part::*;
pub use traits::*;
pub use types::*;
pub use winding::{bake, invert};
