// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Body line parser
//!
//! Turns one body line into one command. Sub-file references come back
//! unresolved so the loader decides when to fetch the referenced part.

use crate::header::strip_comment_marker;
use crate::scanner::SourceLine;
use ldraw_model::{
    Colour, ColourTable, Command, LineType, ParseError, Part, Point3D, Result, SubFileRef,
};
use std::sync::Arc;

/// Sub-file reference whose part has not been loaded yet
#[derive(Clone, Debug, PartialEq)]
pub struct PendingSubFile {
    pub colour: Arc<Colour>,
    pub location: Point3D,
    pub matrix: [i32; 9],
    /// Referenced name, `\` already replaced by `/`
    pub name: String,
}

impl PendingSubFile {
    /// Attach the loaded part
    pub fn resolve(self, part: Part) -> Command {
        Command::SubFile(SubFileRef {
            colour: self.colour,
            location: self.location,
            matrix: self.matrix,
            name: self.name,
            part,
        })
    }
}

/// Result of parsing one body line
#[derive(Clone, Debug, PartialEq)]
pub enum ParsedLine {
    Command(Command),
    SubFile(PendingSubFile),
}

/// Parse one body line
///
/// Returns `Ok(None)` for line types that are skipped: optional lines and
/// unrecognized codes.
pub fn parse_line(line: &SourceLine<'_>, colours: &dyn ColourTable) -> Result<Option<ParsedLine>> {
    let Some(line_type) = LineType::from_token(line.type_token()) else {
        log::warn!("Ignoring line {}: {}", line.number, line.text);
        return Ok(None);
    };

    let text = line.remainder();
    let parsed = match line_type {
        LineType::Comment => ParsedLine::Command(Command::comment(strip_comment_marker(text))),
        LineType::SubFile => ParsedLine::SubFile(parse_sub_file(text, colours)?),
        LineType::Line => {
            let (colour, points) = parse_primitive::<2>(line_type, text, colours)?;
            ParsedLine::Command(Command::Line { colour, points })
        }
        LineType::Triangle => {
            let (colour, points) = parse_primitive::<3>(line_type, text, colours)?;
            ParsedLine::Command(Command::Triangle { colour, points })
        }
        LineType::Quad => {
            let (colour, points) = parse_primitive::<4>(line_type, text, colours)?;
            ParsedLine::Command(Command::Quad { colour, points })
        }
        LineType::OptionalLine => {
            log::warn!("Ignoring optional line {}: {}", line.number, line.text);
            return Ok(None);
        }
    };

    Ok(Some(parsed))
}

/// Split a record into exactly the tokens its line type requires
fn fields(line_type: LineType, text: &str) -> Result<Vec<&str>> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    let expected = line_type.field_count().unwrap_or(fields.len());
    if fields.len() != expected {
        return Err(ParseError::field_count(line_type, expected, fields.len()));
    }
    Ok(fields)
}

fn parse_colour(token: &str, colours: &dyn ColourTable) -> Result<Arc<Colour>> {
    let code: i32 = lexical_core::parse(token.as_bytes()).map_err(|_| {
        ParseError::InvalidColourCode {
            token: token.to_string(),
        }
    })?;
    colours
        .resolve(code)
        .ok_or(ParseError::InvalidColourReference { id: code })
}

fn parse_coordinate(token: &str) -> Result<f64> {
    lexical_core::parse(token.as_bytes()).map_err(|_| ParseError::point_value(token))
}

/// Parse three consecutive coordinate tokens
fn parse_point(tokens: &[&str]) -> Result<Point3D> {
    match tokens {
        [x, y, z] => Ok(Point3D::new(
            parse_coordinate(x)?,
            parse_coordinate(y)?,
            parse_coordinate(z)?,
        )),
        _ => Err(ParseError::point_value(tokens.join(" "))),
    }
}

/// Parse `<colour> x1 y1 z1 ... xN yN zN`
fn parse_primitive<const N: usize>(
    line_type: LineType,
    text: &str,
    colours: &dyn ColourTable,
) -> Result<(Arc<Colour>, [Point3D; N])> {
    let fields = fields(line_type, text)?;
    let colour = parse_colour(fields[0], colours)?;

    let mut points = [Point3D::default(); N];
    for (point, tokens) in points.iter_mut().zip(fields[1..].chunks(3)) {
        *point = parse_point(tokens)?;
    }
    Ok((colour, points))
}

/// Parse `<colour> x y z a b c d e f g h i <file>`
fn parse_sub_file(text: &str, colours: &dyn ColourTable) -> Result<PendingSubFile> {
    let fields = fields(LineType::SubFile, text)?;
    let colour = parse_colour(fields[0], colours)?;
    let location = parse_point(&fields[1..4])?;

    let mut matrix = [0i32; 9];
    for (value, token) in matrix.iter_mut().zip(&fields[4..13]) {
        *value = lexical_core::parse(token.as_bytes())
            .map_err(|_| ParseError::point_value(*token))?;
    }

    let name = fields[13].replace('\\', "/");
    if name.ends_with('/') {
        return Err(ParseError::InvalidSubFileCommand {
            reason: format!("{name} names a directory, not a file"),
        });
    }
    Ok(PendingSubFile {
        colour,
        location,
        matrix,
        name,
    })
}
