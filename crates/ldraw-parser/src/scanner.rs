// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Line scanner using SIMD-accelerated byte searching
//!
//! Splits part text into numbered lines and separates the header block from
//! the body.

use ldraw_model::{LineType, MetaCommand};
use memchr::memchr;

/// One non-blank source line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// 1-based line number in the part text
    pub number: usize,
    /// Line text without its terminator
    pub text: &'a str,
}

impl<'a> SourceLine<'a> {
    /// Leading whitespace-delimited token
    pub fn type_token(&self) -> &'a str {
        self.text.split_whitespace().next().unwrap_or("")
    }

    /// Text after the line type token, trimmed
    pub fn remainder(&self) -> &'a str {
        let text = self.text.trim_start();
        let token = self.type_token();
        text[token.len()..].trim()
    }

    pub fn is_comment(&self) -> bool {
        LineType::from_token(self.type_token()) == Some(LineType::Comment)
    }
}

/// Iterator over the lines of a part
///
/// Accepts both `\r\n` and bare `\n` terminators.
pub struct LineScanner<'a> {
    content: &'a str,
    pos: usize,
    number: usize,
}

impl<'a> LineScanner<'a> {
    /// Create a new scanner for the given content
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            pos: 0,
            number: 0,
        }
    }

    /// All lines that contain something other than whitespace
    pub fn non_blank(content: &'a str) -> Vec<SourceLine<'a>> {
        Self::new(content)
            .filter(|line| !line.text.trim().is_empty())
            .collect()
    }
}

impl<'a> Iterator for LineScanner<'a> {
    type Item = SourceLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.content.len() {
            return None;
        }

        let bytes = self.content.as_bytes();
        let start = self.pos;
        let end = match memchr(b'\n', &bytes[start..]) {
            Some(offset) => {
                self.pos = start + offset + 1;
                start + offset
            }
            None => {
                self.pos = bytes.len();
                bytes.len()
            }
        };

        self.number += 1;
        let text = &self.content[start..end];
        let text = text.strip_suffix('\r').unwrap_or(text);
        Some(SourceLine {
            number: self.number,
            text,
        })
    }
}

/// A part split into its header block and body
#[derive(Debug, Default)]
pub struct SplitSource<'a> {
    /// Leading run of comment lines
    pub header: Vec<SourceLine<'a>>,
    /// Trailing BFC line moved from the header into the body
    pub certification: Option<SourceLine<'a>>,
    /// Lines handed to the line parser
    pub body: Vec<SourceLine<'a>>,
}

/// Split non-blank lines into header and body
///
/// The header is the leading run of comment lines. If its last line contains
/// the `BFC` keyword, that line leaves the header and opens the body instead,
/// so an inline directive right after the header still reaches the command
/// stream. It is also reported as `certification` so the header can take its
/// certification statement from it.
pub fn split_header(lines: Vec<SourceLine<'_>>) -> SplitSource<'_> {
    let header_len = lines
        .iter()
        .position(|line| !line.is_comment())
        .unwrap_or(lines.len());

    let mut header = lines;
    let mut body = header.split_off(header_len);

    let trailing_bfc = header.last().is_some_and(|line| {
        line.text
            .split_whitespace()
            .any(|token| token == MetaCommand::Bfc.keyword())
    });

    let certification = if trailing_bfc {
        let line = header.pop();
        if let Some(line) = line {
            body.insert(0, line);
        }
        line
    } else {
        None
    };

    SplitSource {
        header,
        certification,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_PART: &str = "0 Brick 2 x 4\r\n0 Name: 3001.dat\r\n\r\n0 BFC CERTIFY CCW\r\n1 16 0 0 0 1 0 0 0 1 0 0 0 1 s/3001s01.dat\r\n   \r\n4 16 1 0 1 -1 0 1 -1 0 -1 1 0 -1\r\n";

    #[test]
    fn test_scanner_numbers_lines() {
        let lines: Vec<_> = LineScanner::new("a\r\nb\n\nc").collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].text, "a");
        assert_eq!(lines[1].text, "b");
        assert_eq!(lines[3].number, 4);
        assert_eq!(lines[3].text, "c");
    }

    #[test]
    fn test_non_blank_skips_whitespace_lines() {
        let lines = LineScanner::non_blank(TEST_PART);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[2].number, 4);
        assert_eq!(lines[4].number, 7);
    }

    #[test]
    fn test_source_line_tokens() {
        let line = SourceLine {
            number: 1,
            text: "  3 16  0 0 0 ",
        };
        assert_eq!(line.type_token(), "3");
        assert_eq!(line.remainder(), "16  0 0 0");
        assert!(!line.is_comment());
    }

    #[test]
    fn test_split_moves_trailing_bfc_into_body() {
        let split = split_header(LineScanner::non_blank(TEST_PART));

        assert_eq!(split.header.len(), 2);
        assert_eq!(split.certification.map(|l| l.number), Some(4));
        assert_eq!(split.body.len(), 3);
        assert_eq!(split.body[0].text, "0 BFC CERTIFY CCW");
    }

    #[test]
    fn test_split_keeps_earlier_bfc_in_header() {
        let text = "0 Title\n0 BFC CERTIFY CW\n0 Author: Someone\n2 24 0 0 0 1 1 1";
        let split = split_header(LineScanner::non_blank(text));

        assert_eq!(split.header.len(), 3);
        assert!(split.certification.is_none());
        assert_eq!(split.body.len(), 1);
    }

    #[test]
    fn test_split_comment_only_part() {
        let split = split_header(LineScanner::non_blank("0 Title\n0 // note"));
        assert_eq!(split.header.len(), 2);
        assert!(split.body.is_empty());
    }
}
