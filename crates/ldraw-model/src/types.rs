// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for LDraw data representation
//!
//! LDraw coordinates are measured in LDraw Units (LDU): a brick is 20 LDU wide
//! and 24 LDU tall, a plate 8 LDU tall.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A point in LDU space
#[derive(Clone, Copy, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    /// Create a new point
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Point3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}

/// Line type, the first token of every LDraw line
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum LineType {
    /// `0` - comment or META command
    Comment,
    /// `1` - sub-file reference
    SubFile,
    /// `2` - line between two points
    Line,
    /// `3` - filled triangle
    Triangle,
    /// `4` - filled quadrilateral
    Quad,
    /// `5` - optional line, recognized but not supported
    OptionalLine,
}

impl LineType {
    /// Parse the leading token of a line
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "0" => Some(LineType::Comment),
            "1" => Some(LineType::SubFile),
            "2" => Some(LineType::Line),
            "3" => Some(LineType::Triangle),
            "4" => Some(LineType::Quad),
            "5" => Some(LineType::OptionalLine),
            _ => None,
        }
    }

    /// Tokens following the line type for parsed drawable records, colour
    /// included
    pub fn field_count(&self) -> Option<usize> {
        match self {
            LineType::SubFile => Some(14),
            LineType::Line => Some(7),
            LineType::Triangle => Some(10),
            LineType::Quad => Some(13),
            LineType::OptionalLine | LineType::Comment => None,
        }
    }
}

impl fmt::Display for LineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LineType::Comment => "comment",
            LineType::SubFile => "sub-file",
            LineType::Line => "line",
            LineType::Triangle => "triangle",
            LineType::Quad => "quadrilateral",
            LineType::OptionalLine => "optional line",
        };
        f.write_str(name)
    }
}

/// Header META keywords, in the order they are matched
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum MetaCommand {
    Name,
    Author,
    LdrawOrg,
    Help,
    Category,
    CmdLine,
    License,
    Keywords,
    History,
    Bfc,
}

impl MetaCommand {
    /// All header keywords in match order
    pub const ALL: [MetaCommand; 10] = [
        MetaCommand::Name,
        MetaCommand::Author,
        MetaCommand::LdrawOrg,
        MetaCommand::Help,
        MetaCommand::Category,
        MetaCommand::CmdLine,
        MetaCommand::License,
        MetaCommand::Keywords,
        MetaCommand::History,
        MetaCommand::Bfc,
    ];

    /// Keyword as written in files
    pub fn keyword(&self) -> &'static str {
        match self {
            MetaCommand::Name => "Name:",
            MetaCommand::Author => "Author:",
            MetaCommand::LdrawOrg => "!LDRAW_ORG",
            MetaCommand::Help => "!HELP",
            MetaCommand::Category => "!CATEGORY",
            MetaCommand::CmdLine => "!CMDLINE",
            MetaCommand::License => "!LICENSE",
            MetaCommand::Keywords => "!KEYWORDS",
            MetaCommand::History => "!HISTORY",
            MetaCommand::Bfc => "BFC",
        }
    }

    /// Match comment text (line type already stripped) against the keywords
    ///
    /// Returns the keyword and the trimmed remainder. Keywords ending in `:`
    /// may be followed directly by their value; all others must be followed
    /// by whitespace or the end of the text.
    pub fn parse(text: &str) -> Option<(MetaCommand, &str)> {
        let text = text.trim_start();
        Self::ALL.iter().find_map(|&command| {
            let keyword = command.keyword();
            let rest = text.strip_prefix(keyword)?;
            let delimited = keyword.ends_with(':')
                || rest.is_empty()
                || rest.starts_with(char::is_whitespace);
            delimited.then(|| (command, rest.trim()))
        })
    }
}

impl fmt::Display for MetaCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Inline BFC directive carried by a comment line
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum BfcDirective {
    /// `CW`
    ClockWise,
    /// `CCW`
    CounterClockWise,
    /// `CLIP` - enable culling
    Clip,
    /// `NOCLIP` - disable culling
    NoClip,
    /// `INVERTNEXT` - reverse the winding of the next command
    InvertNext,
}

impl BfcDirective {
    pub const ALL: [BfcDirective; 5] = [
        BfcDirective::ClockWise,
        BfcDirective::CounterClockWise,
        BfcDirective::Clip,
        BfcDirective::NoClip,
        BfcDirective::InvertNext,
    ];

    /// Token as written after `BFC`
    pub fn token(&self) -> &'static str {
        match self {
            BfcDirective::ClockWise => "CW",
            BfcDirective::CounterClockWise => "CCW",
            BfcDirective::Clip => "CLIP",
            BfcDirective::NoClip => "NOCLIP",
            BfcDirective::InvertNext => "INVERTNEXT",
        }
    }
}

impl FromStr for BfcDirective {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|directive| directive.token() == s)
            .ok_or(())
    }
}

impl fmt::Display for BfcDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BFC {}", self.token())
    }
}

/// Whether a part declares BFC-compliant winding
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum BfcCertification {
    Certified,
    #[default]
    NotCertified,
}

impl BfcCertification {
    pub const CERTIFY: &'static str = "CERTIFY";
    pub const NOCERTIFY: &'static str = "NOCERTIFY";
}

/// Vertex order that faces the viewer
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum Winding {
    ClockWise,
    #[default]
    CounterClockWise,
}

impl Winding {
    /// The opposite vertex order
    pub fn reversed(self) -> Self {
        match self {
            Winding::ClockWise => Winding::CounterClockWise,
            Winding::CounterClockWise => Winding::ClockWise,
        }
    }
}
