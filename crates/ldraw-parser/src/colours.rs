// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Colour table loaded from `LDConfig.ldr`
//!
//! Reads `!COLOUR` records using nom combinators. A `// LEGOID` comment
//! attaches an alias to the colour record that follows it.

use crate::scanner::{LineScanner, SourceLine};
use ldraw_model::{Colour, ColourAlias, ColourTable, ParseError, Result};
use nom::{
    bytes::complete::{tag, take_while1},
    character::complete::{char, digit1, space0, space1},
    combinator::{map, map_res, opt, recognize, rest},
    sequence::preceded,
    IResult, Parser,
};
use rustc_hash::FxHashMap;
use std::path::Path;
use std::sync::Arc;

/// In-memory colour table keyed by colour code
#[derive(Clone, Debug, Default)]
pub struct ColourMap {
    colours: FxHashMap<i32, Arc<Colour>>,
}

impl ColourMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a colour, replacing any colour with the same code
    pub fn insert(&mut self, colour: Colour) -> Option<Arc<Colour>> {
        self.colours.insert(colour.code, Arc::new(colour))
    }

    pub fn get(&self, code: i32) -> Option<&Colour> {
        self.colours.get(&code).map(|colour| colour.as_ref())
    }

    pub fn len(&self) -> usize {
        self.colours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }

    /// Parse `LDConfig.ldr` text
    ///
    /// Lines other than `!COLOUR` records and `// LEGOID` aliases are ignored.
    /// A later record with an existing code replaces the earlier one.
    pub fn parse(content: &str) -> Result<Self> {
        let mut map = Self::new();
        let mut aliases = Vec::new();

        for line in LineScanner::non_blank(content) {
            if !line.is_comment() {
                continue;
            }
            let text = line.remainder();

            if text.starts_with("!COLOUR") {
                let mut colour = parse_colour_line(&line, text)?;
                colour.aliases = std::mem::take(&mut aliases);
                map.insert(colour);
            } else if let Some(alias) = parse_alias_line(&line, text)? {
                aliases.push(alias);
            }
        }

        log::debug!("Loaded {} colours", map.len());
        Ok(map)
    }

    /// Read and parse a colour configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::parse(&String::from_utf8_lossy(&bytes))
    }
}

impl ColourTable for ColourMap {
    fn resolve(&self, code: i32) -> Option<Arc<Colour>> {
        self.colours.get(&code).cloned()
    }
}

impl FromIterator<Colour> for ColourMap {
    fn from_iter<I: IntoIterator<Item = Colour>>(iter: I) -> Self {
        let mut map = Self::new();
        for colour in iter {
            map.insert(colour);
        }
        map
    }
}

// ============================================================================
// Record grammar
// ============================================================================

/// Fields of one `!COLOUR` record
#[derive(Debug, PartialEq)]
struct ColourRecord<'a> {
    name: &'a str,
    code: i32,
    value: &'a str,
    edge: &'a str,
    alpha: Option<u8>,
    luminance: Option<u8>,
    material: &'a str,
}

impl ColourRecord<'_> {
    fn into_colour(self) -> Colour {
        let mut colour = Colour::new(self.code, self.name, self.value).with_edge(self.edge);
        colour.alpha = self.alpha;
        colour.luminance = self.luminance;
        colour.material = Some(self.material.trim())
            .filter(|material| !material.is_empty())
            .map(str::to_string);
        colour
    }
}

/// Parse a non-whitespace word
fn word(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace()).parse(input)
}

/// Parse a signed integer
fn integer(input: &str) -> IResult<&str, i32> {
    map_res(recognize((opt(char('-')), digit1)), |digits: &str| {
        lexical_core::parse::<i32>(digits.as_bytes())
    })
    .parse(input)
}

/// Parse an unsigned byte value
fn byte(input: &str) -> IResult<&str, u8> {
    map_res(digit1, |digits: &str| lexical_core::parse::<u8>(digits.as_bytes())).parse(input)
}

/// Parse an unsigned id
fn id(input: &str) -> IResult<&str, u32> {
    map_res(digit1, |digits: &str| lexical_core::parse::<u32>(digits.as_bytes())).parse(input)
}

/// Parse ` KEYWORD value`
fn field<'a, O>(
    keyword: &'static str,
    value: fn(&'a str) -> IResult<&'a str, O>,
) -> impl FnMut(&'a str) -> IResult<&'a str, O> {
    move |input| preceded((space1, tag(keyword), space1), value).parse(input)
}

/// Parse `!COLOUR name CODE n VALUE v EDGE e [ALPHA a] [LUMINANCE l] [material]`
fn colour_record(input: &str) -> IResult<&str, ColourRecord<'_>> {
    map(
        (
            preceded((tag("!COLOUR"), space1), word),
            field("CODE", integer),
            field("VALUE", word),
            field("EDGE", word),
            opt(field("ALPHA", byte)),
            opt(field("LUMINANCE", byte)),
            rest,
        ),
        |(name, code, value, edge, alpha, luminance, material)| ColourRecord {
            name,
            code,
            value,
            edge,
            alpha,
            luminance,
            material,
        },
    )
    .parse(input)
}

/// Parse `// LEGOID id - description`
fn alias(input: &str) -> IResult<&str, ColourAlias> {
    map(
        (
            preceded((tag("//"), space0, tag("LEGOID"), space1), id),
            preceded((space0, char('-'), space0), rest),
        ),
        |(id, description): (u32, &str)| ColourAlias {
            id,
            description: description.trim().to_string(),
        },
    )
    .parse(input)
}

fn parse_colour_line(line: &SourceLine<'_>, text: &str) -> Result<Colour> {
    colour_record(text)
        .map(|(_, record)| record.into_colour())
        .map_err(|e| ParseError::colour_config(line.number, format!("malformed colour: {e}")))
}

fn parse_alias_line(line: &SourceLine<'_>, text: &str) -> Result<Option<ColourAlias>> {
    let is_alias = text
        .strip_prefix("//")
        .is_some_and(|rest| rest.trim_start().starts_with("LEGOID"));
    if !is_alias {
        return Ok(None);
    }

    alias(text)
        .map(|(_, alias)| Some(alias))
        .map_err(|e| ParseError::colour_config(line.number, format!("malformed LEGOID: {e}")))
}
