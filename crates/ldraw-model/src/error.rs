// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for LDraw parsing operations

use crate::LineType;
use thiserror::Error;

/// Result type alias for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while loading a part
///
/// Every variant is fatal for the part being parsed and, transitively, for
/// every ancestor that was resolving it as a sub-file.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The part source contained no non-blank lines
    #[error("Part {name} is empty")]
    EmptyFile { name: String },

    /// Strict header mode found no title line
    #[error("Part {name} has no description line")]
    MissingDescription { name: String },

    /// Drawable record with the wrong number of tokens
    #[error("Invalid {command_kind} command: expected {expected} fields, got {got}")]
    InvalidFieldCount {
        command_kind: LineType,
        expected: usize,
        got: usize,
    },

    /// Colour token is not an integer
    #[error("Invalid colour code: {token}")]
    InvalidColourCode { token: String },

    /// Colour code has no entry in the colour table
    #[error("Colour {id} is not defined in the colour table")]
    InvalidColourReference { id: i32 },

    /// Coordinate token failed numeric parsing
    #[error("Invalid point value: {token}")]
    InvalidPointValue { token: String },

    /// Malformed sub-file reference
    #[error("Invalid sub-file command: {reason}")]
    InvalidSubFileCommand { reason: String },

    /// The part source could not supply bytes for a name
    #[error("File not found: {name}")]
    FileNotFound { name: String },

    /// A part references itself, directly or through its sub-files
    #[error("Cyclic sub-file reference to {name}")]
    CyclicReference { name: String },

    /// Sub-file nesting exceeded the configured limit
    #[error("Sub-file {name} exceeds the nesting limit of {depth}")]
    NestingTooDeep { name: String, depth: usize },

    /// Malformed colour configuration record
    #[error("Invalid colour configuration at line {line}: {message}")]
    ColourConfig { line: usize, message: String },

    /// Parser options could not be read
    #[error("Invalid parser options: {0}")]
    InvalidOptions(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure raised while handling one line of a part
    #[error("{part}:{line}: {source}")]
    AtLine {
        part: String,
        line: usize,
        #[source]
        source: Box<ParseError>,
    },
}

impl ParseError {
    /// Create a field count error
    pub fn field_count(command_kind: LineType, expected: usize, got: usize) -> Self {
        ParseError::InvalidFieldCount {
            command_kind,
            expected,
            got,
        }
    }

    /// Create a point value error
    pub fn point_value(token: impl Into<String>) -> Self {
        ParseError::InvalidPointValue {
            token: token.into(),
        }
    }

    /// Create a file not found error
    pub fn not_found(name: impl Into<String>) -> Self {
        ParseError::FileNotFound { name: name.into() }
    }

    /// Create a colour configuration error
    pub fn colour_config(line: usize, message: impl Into<String>) -> Self {
        ParseError::ColourConfig {
            line,
            message: message.into(),
        }
    }

    /// Attach the part name and 1-based line number to an error
    pub fn at_line(self, part: impl Into<String>, line: usize) -> Self {
        ParseError::AtLine {
            part: part.into(),
            line,
            source: Box::new(self),
        }
    }

    /// The innermost error, with all line context stripped
    pub fn kind(&self) -> &ParseError {
        match self {
            ParseError::AtLine { source, .. } => source.kind(),
            other => other,
        }
    }

    /// Line context from the outermost part inwards, as `(part, line)` pairs
    pub fn trail(&self) -> Vec<(&str, usize)> {
        let mut trail = Vec::new();
        let mut current = self;
        while let ParseError::AtLine { part, line, source } = current {
            trail.push((part.as_str(), *line));
            current = source;
        }
        trail
    }
}
