// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Commands, one per parsed body line

use crate::{BfcDirective, Colour, LineType, MetaCommand, Part, Point3D};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Reference to another part, placed by a location and a 3x3 matrix
///
/// The command owns the resolved sub-part outright.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubFileRef {
    pub colour: Arc<Colour>,
    pub location: Point3D,
    /// Matrix components `a b c d e f g h i`, row-major
    ///
    /// Parsed as integers, so fractional (scaling) transforms are rejected.
    pub matrix: [i32; 9],
    /// Referenced file name with `/` separators
    pub name: String,
    pub part: Part,
}

impl SubFileRef {
    /// Copy of this reference with the sub-part replaced
    pub fn with_part(&self, part: Part) -> Self {
        Self {
            colour: Arc::clone(&self.colour),
            location: self.location,
            matrix: self.matrix,
            name: self.name.clone(),
            part,
        }
    }
}

/// One structured record derived from one input line
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Line type 0, stripped of its `//` marker
    Comment {
        text: String,
        bfc: Option<BfcDirective>,
    },
    /// Line type 1
    SubFile(SubFileRef),
    /// Line type 2
    Line {
        colour: Arc<Colour>,
        points: [Point3D; 2],
    },
    /// Line type 3
    Triangle {
        colour: Arc<Colour>,
        points: [Point3D; 3],
    },
    /// Line type 4
    Quad {
        colour: Arc<Colour>,
        points: [Point3D; 4],
    },
}

impl Command {
    /// Build a comment, recognizing an inline BFC directive
    ///
    /// Only text starting with the `BFC` keyword can carry a directive, and
    /// only when the first token after it is a known directive.
    pub fn comment(text: impl Into<String>) -> Self {
        let text = text.into();
        let bfc = match MetaCommand::parse(&text) {
            Some((MetaCommand::Bfc, rest)) => rest
                .split_whitespace()
                .next()
                .and_then(|token| token.parse().ok()),
            _ => None,
        };
        Command::Comment { text, bfc }
    }

    pub fn line_type(&self) -> LineType {
        match self {
            Command::Comment { .. } => LineType::Comment,
            Command::SubFile(_) => LineType::SubFile,
            Command::Line { .. } => LineType::Line,
            Command::Triangle { .. } => LineType::Triangle,
            Command::Quad { .. } => LineType::Quad,
        }
    }

    /// Colour of drawable commands
    pub fn colour(&self) -> Option<&Arc<Colour>> {
        match self {
            Command::Comment { .. } => None,
            Command::SubFile(sub) => Some(&sub.colour),
            Command::Line { colour, .. }
            | Command::Triangle { colour, .. }
            | Command::Quad { colour, .. } => Some(colour),
        }
    }

    /// Points of line, triangle and quad commands, in winding order
    pub fn points(&self) -> &[Point3D] {
        match self {
            Command::Line { points, .. } => points.as_slice(),
            Command::Triangle { points, .. } => points.as_slice(),
            Command::Quad { points, .. } => points.as_slice(),
            Command::Comment { .. } | Command::SubFile(_) => &[],
        }
    }

    /// True for line, triangle and quad commands
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Command::Line { .. } | Command::Triangle { .. } | Command::Quad { .. }
        )
    }

    pub fn bfc_directive(&self) -> Option<BfcDirective> {
        match self {
            Command::Comment { bfc, .. } => *bfc,
            _ => None,
        }
    }

    pub fn is_invert_next(&self) -> bool {
        self.bfc_directive() == Some(BfcDirective::InvertNext)
    }

    pub fn as_sub_file(&self) -> Option<&SubFileRef> {
        match self {
            Command::SubFile(sub) => Some(sub),
            _ => None,
        }
    }

    /// Winding-reversed copy
    ///
    /// Point order is reversed for lines, triangles and quads; comments and
    /// sub-file references are returned unchanged.
    pub fn inverted(&self) -> Command {
        match self {
            Command::Line { colour, points } => {
                let mut points = *points;
                points.reverse();
                Command::Line {
                    colour: Arc::clone(colour),
                    points,
                }
            }
            Command::Triangle { colour, points } => {
                let mut points = *points;
                points.reverse();
                Command::Triangle {
                    colour: Arc::clone(colour),
                    points,
                }
            }
            Command::Quad { colour, points } => {
                let mut points = *points;
                points.reverse();
                Command::Quad {
                    colour: Arc::clone(colour),
                    points,
                }
            }
            Command::Comment { .. } | Command::SubFile(_) => self.clone(),
        }
    }
}
