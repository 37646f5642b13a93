// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Recursive part loader
//!
//! Fetches a part, parses its header and body, and loads every referenced
//! sub-file into the command that references it.

use crate::cache::{part_key, PartCache};
use crate::header::parse_header;
use crate::options::ParseOptions;
use crate::scanner::{split_header, LineScanner, SourceLine};
use crate::tokenizer::{parse_line, ParsedLine, PendingSubFile};
use ldraw_model::{ColourTable, Command, ParseError, Part, PartSource, Result};
use rayon::prelude::*;

/// One load operation over a source, a colour table and settings
pub struct PartLoader<'a> {
    source: &'a dyn PartSource,
    colours: &'a dyn ColourTable,
    options: &'a ParseOptions,
    cache: Option<&'a PartCache>,
}

impl<'a> PartLoader<'a> {
    pub fn new(
        source: &'a dyn PartSource,
        colours: &'a dyn ColourTable,
        options: &'a ParseOptions,
        cache: Option<&'a PartCache>,
    ) -> Self {
        Self {
            source,
            colours,
            options,
            cache,
        }
    }

    /// Load a part and all of its sub-files
    pub fn load(&self, name: &str) -> Result<Part> {
        self.load_nested(name, &[])
    }

    /// Parse part text that did not come from the source
    ///
    /// Sub-files referenced by the text are still fetched from the source.
    pub fn load_str(&self, name: &str, content: &str) -> Result<Part> {
        self.parse_content(name, content, &[part_key(name)])
    }

    /// Load a part below the given ancestor chain
    fn load_nested(&self, name: &str, ancestors: &[String]) -> Result<Part> {
        let key = part_key(name);
        if ancestors.contains(&key) {
            return Err(ParseError::CyclicReference {
                name: name.to_string(),
            });
        }
        if ancestors.len() >= self.options.max_depth {
            return Err(ParseError::NestingTooDeep {
                name: name.to_string(),
                depth: self.options.max_depth,
            });
        }

        if let Some(part) = self.cached(name, ancestors.len()) {
            log::debug!("Cache hit for {}", name);
            return Ok(part);
        }

        log::debug!("Fetching {}", name);
        let bytes = self.source.fetch(name)?;
        let content = String::from_utf8_lossy(&bytes);

        let mut chain = ancestors.to_vec();
        chain.push(key);
        let part = self.parse_content(name, &content, &chain)?;

        if let Some(cache) = self.cache {
            cache.insert(name, &part);
        }
        Ok(part)
    }

    /// Cached copy of a part, if it fits under the nesting limit here
    fn cached(&self, name: &str, ancestor_count: usize) -> Option<Part> {
        let part = self.cache?.get(name)?;
        (ancestor_count + part.depth() <= self.options.max_depth).then_some(part)
    }

    fn parse_content(&self, name: &str, content: &str, chain: &[String]) -> Result<Part> {
        let lines = LineScanner::non_blank(content);
        if lines.is_empty() {
            return Err(ParseError::EmptyFile {
                name: name.to_string(),
            });
        }

        let split = split_header(lines);
        let header = parse_header(&split.header, split.certification.as_ref());
        if self.options.require_title && header.title.is_none() {
            return Err(ParseError::MissingDescription {
                name: name.to_string(),
            });
        }

        let commands = if self.options.parallel {
            self.parse_body_parallel(name, &split.body, chain)?
        } else {
            self.parse_body(name, &split.body, chain)?
        };

        Ok(Part::new(header, commands))
    }

    /// Parse body lines in order, loading each sub-file as it is reached
    fn parse_body(&self, name: &str, body: &[SourceLine<'_>], chain: &[String]) -> Result<Vec<Command>> {
        let mut commands = Vec::with_capacity(body.len());

        for line in body {
            let parsed = parse_line(line, self.colours).map_err(|e| e.at_line(name, line.number))?;
            match parsed {
                Some(ParsedLine::Command(command)) => commands.push(command),
                Some(ParsedLine::SubFile(pending)) => {
                    let command = self
                        .resolve(pending, chain)
                        .map_err(|e| e.at_line(name, line.number))?;
                    commands.push(command);
                }
                None => {}
            }
        }

        Ok(commands)
    }

    /// Parse every body line, then load sibling sub-files in parallel
    fn parse_body_parallel(
        &self,
        name: &str,
        body: &[SourceLine<'_>],
        chain: &[String],
    ) -> Result<Vec<Command>> {
        let mut parsed = Vec::with_capacity(body.len());
        for line in body {
            if let Some(result) =
                parse_line(line, self.colours).map_err(|e| e.at_line(name, line.number))?
            {
                parsed.push((line.number, result));
            }
        }

        parsed
            .into_par_iter()
            .map(|(number, result)| match result {
                ParsedLine::Command(command) => Ok(command),
                ParsedLine::SubFile(pending) => self
                    .resolve(pending, chain)
                    .map_err(|e| e.at_line(name, number)),
            })
            .collect()
    }

    fn resolve(&self, pending: PendingSubFile, chain: &[String]) -> Result<Command> {
        let part = self.load_nested(&pending.name, chain)?;
        log::trace!("Resolved sub-file {}", pending.name);
        Ok(pending.resolve(part))
    }
}
