// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Header block parsing
//!
//! Extracts the title, META commands and BFC certification from the leading
//! comment lines of a part.

use crate::scanner::SourceLine;
use ldraw_model::{BfcCertification, MetaCommand, PartHeader, Winding};

/// Build a part header
///
/// # Arguments
/// * `lines` - The header block, trailing BFC line already removed
/// * `certification` - The removed trailing BFC line, if any
pub fn parse_header(lines: &[SourceLine<'_>], certification: Option<&SourceLine<'_>>) -> PartHeader {
    let mut header = PartHeader::default();

    for (index, line) in lines.iter().enumerate() {
        let text = line.remainder();
        match MetaCommand::parse(text) {
            Some((command, value)) => apply_meta(&mut header, command, value),
            None if index == 0 => header.title = Some(text.to_string()),
            None => {
                if text.starts_with('!') {
                    log::warn!("Unknown header keyword on line {}: {}", line.number, text);
                }
                header.comments.push(strip_comment_marker(text).to_string());
            }
        }
    }

    if let Some(line) = certification {
        if let Some((MetaCommand::Bfc, value)) = MetaCommand::parse(line.remainder()) {
            apply_certification(&mut header, value);
        }
    }

    header
}

fn apply_meta(header: &mut PartHeader, command: MetaCommand, value: &str) {
    match command {
        MetaCommand::License => header.license.push(value.to_string()),
        MetaCommand::History => header.history.push(value.to_string()),
        MetaCommand::Keywords => header.keywords.extend(parse_keywords(value)),
        MetaCommand::Bfc => apply_certification(header, value),
        _ => {
            header.metadata.insert(command, value.to_string());
        }
    }
}

/// Apply a `BFC` header statement such as `CERTIFY CCW`
///
/// Tokens are compared whole, so `NOCERTIFY` never reads as `CERTIFY` and
/// `CCW` never reads as `CW`.
fn apply_certification(header: &mut PartHeader, value: &str) {
    let tokens: Vec<&str> = value.split_whitespace().collect();

    if tokens.contains(&BfcCertification::CERTIFY) {
        header.bfc_certification = BfcCertification::Certified;
        header.default_winding = if tokens.contains(&"CW") {
            Winding::ClockWise
        } else {
            Winding::CounterClockWise
        };
    } else if tokens.contains(&BfcCertification::NOCERTIFY) {
        header.bfc_certification = BfcCertification::NotCertified;
    }
}

fn parse_keywords(value: &str) -> impl Iterator<Item = String> + '_ {
    value
        .split(',')
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .map(str::to_string)
}

/// Strip a leading `//` comment marker
pub(crate) fn strip_comment_marker(text: &str) -> &str {
    text.strip_prefix("//").unwrap_or(text).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::{split_header, LineScanner};

    fn header_of(text: &str) -> PartHeader {
        let split = split_header(LineScanner::non_blank(text));
        parse_header(&split.header, split.certification.as_ref())
    }

    const BRICK: &str = "0 Brick  2 x  4
0 Name: 3001.dat
0 Author: James Jessiman
0 !LDRAW_ORG Part UPDATE 2004-03
0 !LICENSE Redistributable under CCAL version 2.0
0 !LICENSE see CAreadme.txt
0 // a free text note
0 !KEYWORDS brick, 2x4,  classic ,
0 !KEYWORDS bar
0 !HISTORY 2002-05-07 [unknown] BFC Certification
0 !HISTORY 2004-03-10 [PTadmin] Official Update 2004-03
0 BFC CERTIFY CW
0 !CATEGORY Brick
1 16 0 0 0 1 0 0 0 1 0 0 0 1 s/3001s01.dat
";

    #[test]
    fn test_parse_full_header() {
        let header = header_of(BRICK);

        assert_eq!(header.title.as_deref(), Some("Brick  2 x  4"));
        assert_eq!(
            header.metadata.get(&MetaCommand::Name).map(String::as_str),
            Some("3001.dat")
        );
        assert_eq!(
            header.metadata.get(&MetaCommand::LdrawOrg).map(String::as_str),
            Some("Part UPDATE 2004-03")
        );
        assert_eq!(
            header.metadata.get(&MetaCommand::Category).map(String::as_str),
            Some("Brick")
        );
        assert_eq!(header.license.len(), 2);
        assert_eq!(header.history.len(), 2);
        assert_eq!(header.keywords, vec!["brick", "2x4", "classic", "bar"]);
        assert_eq!(header.comments, vec!["a free text note"]);
        assert_eq!(header.bfc_certification, BfcCertification::Certified);
        assert_eq!(header.default_winding, Winding::ClockWise);
        assert!(!header.metadata.contains_key(&MetaCommand::Bfc));
    }

    #[test]
    fn test_single_valued_meta_last_write_wins() {
        let header = header_of("0 Title\n0 Author: First\n0 Author: Second\n2 24 0 0 0 1 1 1");
        assert_eq!(
            header.metadata.get(&MetaCommand::Author).map(String::as_str),
            Some("Second")
        );
    }

    #[test]
    fn test_first_line_meta_is_not_a_title() {
        let header = header_of("0 Name: foo.dat\n0 Author: X\n2 24 0 0 0 1 1 1");
        assert_eq!(header.title, None);
        assert_eq!(
            header.metadata.get(&MetaCommand::Name).map(String::as_str),
            Some("foo.dat")
        );
    }

    #[test]
    fn test_trailing_bfc_still_certifies() {
        let header = header_of("0 My Part\n0 Author: X\n0 BFC CERTIFY CCW\n3 16 0 0 0 1 0 0 0 1 0");

        assert_eq!(header.title.as_deref(), Some("My Part"));
        assert_eq!(header.bfc_certification, BfcCertification::Certified);
        assert_eq!(header.default_winding, Winding::CounterClockWise);
        assert!(header.comments.is_empty());
    }

    #[test]
    fn test_nocertify() {
        let header = header_of("0 Title\n0 BFC NOCERTIFY\n0 Author: X\n2 24 0 0 0 1 1 1");
        assert_eq!(header.bfc_certification, BfcCertification::NotCertified);
        assert_eq!(header.default_winding, Winding::CounterClockWise);
    }

    #[test]
    fn test_certify_without_winding_defaults_to_ccw() {
        let header = header_of("0 Title\n0 BFC CERTIFY\n0 Author: X\n2 24 0 0 0 1 1 1");
        assert_eq!(header.bfc_certification, BfcCertification::Certified);
        assert_eq!(header.default_winding, Winding::CounterClockWise);
    }

    #[test]
    fn test_unknown_meta_is_a_comment() {
        let header = header_of("0 Title\n0 STEP\n0 !COLOUR Black CODE 0\n2 24 0 0 0 1 1 1");
        assert_eq!(header.comments, vec!["STEP", "!COLOUR Black CODE 0"]);
    }
}
