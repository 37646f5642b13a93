// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parsed part: header metadata plus an ordered command sequence

use crate::{BfcCertification, Command, MetaCommand, Winding};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Header fields extracted from the leading comment block of a part
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PartHeader {
    /// First header line, unless it is a META command
    pub title: Option<String>,
    /// Free-text header comments
    pub comments: Vec<String>,
    /// Single-valued META commands (last write wins)
    pub metadata: BTreeMap<MetaCommand, String>,
    pub keywords: Vec<String>,
    pub history: Vec<String>,
    pub license: Vec<String>,
    pub bfc_certification: BfcCertification,
    pub default_winding: Winding,
}

/// One parsed file
///
/// A part is immutable once built. Commands keep file order, which decides
/// which command an `INVERTNEXT` directive applies to; transforms such as
/// [`Part::baked`] return a new part.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Part {
    header: PartHeader,
    commands: Vec<Command>,
}

impl Part {
    /// Create a part from its header and commands
    pub fn new(header: PartHeader, commands: Vec<Command>) -> Self {
        Self { header, commands }
    }

    /// Same header, different commands
    pub fn with_commands(&self, commands: Vec<Command>) -> Self {
        Self {
            header: self.header.clone(),
            commands,
        }
    }

    pub fn header(&self) -> &PartHeader {
        &self.header
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<Command> {
        self.commands
    }

    pub fn title(&self) -> Option<&str> {
        self.header.title.as_deref()
    }

    pub fn comments(&self) -> &[String] {
        &self.header.comments
    }

    pub fn metadata(&self, command: MetaCommand) -> Option<&str> {
        self.header.metadata.get(&command).map(String::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.metadata(MetaCommand::Name)
    }

    pub fn author(&self) -> Option<&str> {
        self.metadata(MetaCommand::Author)
    }

    pub fn category(&self) -> Option<&str> {
        self.metadata(MetaCommand::Category)
    }

    pub fn keywords(&self) -> &[String] {
        &self.header.keywords
    }

    pub fn history(&self) -> &[String] {
        &self.header.history
    }

    pub fn license(&self) -> &[String] {
        &self.header.license
    }

    pub fn bfc_certification(&self) -> BfcCertification {
        self.header.bfc_certification
    }

    pub fn is_certified(&self) -> bool {
        self.header.bfc_certification == BfcCertification::Certified
    }

    pub fn default_winding(&self) -> Winding {
        self.header.default_winding
    }

    /// Levels of parts in this tree, counting this one
    pub fn depth(&self) -> usize {
        1 + self
            .commands
            .iter()
            .filter_map(Command::as_sub_file)
            .map(|sub| sub.part.depth())
            .max()
            .unwrap_or(0)
    }

    /// Line, triangle and quad commands in this part and all sub-parts
    pub fn drawable_count(&self) -> usize {
        self.commands
            .iter()
            .map(|command| match command {
                Command::SubFile(sub) => sub.part.drawable_count(),
                other => usize::from(other.is_primitive()),
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Colour, Point3D, SubFileRef};
    use std::sync::Arc;

    fn triangle() -> Command {
        Command::Triangle {
            colour: Arc::new(Colour::new(16, "Main_Colour", "#FFFF80")),
            points: [
                Point3D::new(0.0, 0.0, 0.0),
                Point3D::new(1.0, 0.0, 0.0),
                Point3D::new(0.0, 1.0, 0.0),
            ],
        }
    }

    fn sub_file(part: Part) -> Command {
        Command::SubFile(SubFileRef {
            colour: Arc::new(Colour::new(16, "Main_Colour", "#FFFF80")),
            location: Point3D::default(),
            matrix: [1, 0, 0, 0, 1, 0, 0, 0, 1],
            name: "child.dat".to_string(),
            part,
        })
    }

    #[test]
    fn test_header_accessors() {
        let mut header = PartHeader {
            title: Some("Brick 2 x 4".to_string()),
            ..Default::default()
        };
        header
            .metadata
            .insert(MetaCommand::Author, "James Jessiman".to_string());
        let part = Part::new(header, Vec::new());

        assert_eq!(part.title(), Some("Brick 2 x 4"));
        assert_eq!(part.author(), Some("James Jessiman"));
        assert_eq!(part.category(), None);
        assert!(!part.is_certified());
        assert_eq!(part.default_winding(), Winding::CounterClockWise);
    }

    #[test]
    fn test_depth_and_drawable_count() {
        let leaf = Part::new(PartHeader::default(), vec![triangle(), triangle()]);
        let middle = Part::new(PartHeader::default(), vec![sub_file(leaf), triangle()]);
        let root = Part::new(
            PartHeader::default(),
            vec![Command::comment("root"), sub_file(middle)],
        );

        assert_eq!(root.depth(), 3);
        assert_eq!(root.drawable_count(), 3);
    }

    #[test]
    fn test_serialize_part() {
        let part = Part::new(PartHeader::default(), vec![triangle()]);
        let json = serde_json::to_string(&part).unwrap();
        let back: Part = serde_json::from_str(&json).unwrap();
        assert_eq!(back, part);
    }
}
