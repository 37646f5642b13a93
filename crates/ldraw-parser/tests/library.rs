// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use ldraw_model::{ParseError, PartSource, Winding};
use ldraw_parser::{ColourMap, LibrarySource, PartParser};
use std::fs;
use std::path::{Path, PathBuf};

const LDCONFIG: &str = "0 LDraw.org Configuration File
0 // LEGOID  21 - Bright Red
0 !COLOUR Red                 CODE   4   VALUE #C91A09   EDGE #333333
0 !COLOUR Main_Colour         CODE  16   VALUE #FFFF80   EDGE #333333
0 !COLOUR Edge_Colour         CODE  24   VALUE #7F7F7F   EDGE #333333
";

/// Scratch library directory removed on drop
struct Library {
    root: PathBuf,
}

impl Library {
    fn new(test: &str) -> Self {
        let root = std::env::temp_dir().join(format!("ldraw-parser-{}-{}", test, std::process::id()));
        let _ = fs::remove_dir_all(&root);
        for dir in ["p/48", "p", "parts/s", "parts", "models"] {
            fs::create_dir_all(root.join(dir)).unwrap();
        }
        fs::write(root.join("LDConfig.ldr"), LDCONFIG).unwrap();
        Self { root }
    }

    fn write(&self, path: &str, content: &str) -> PathBuf {
        let path = self.root.join(path);
        fs::write(&path, content).unwrap();
        path
    }

    fn root(&self) -> &Path {
        &self.root
    }
}

impl Drop for Library {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

#[test]
fn test_search_order_prefers_hi_res_primitives() {
    let library = Library::new("order");
    library.write("p/48/4-4edge.dat", "0 Hi-res edge");
    library.write("p/4-4edge.dat", "0 Edge");
    library.write("p/stud.dat", "0 Stud");

    let source = LibrarySource::new(library.root());
    assert_eq!(source.fetch("4-4edge.dat").unwrap(), b"0 Hi-res edge");
    assert_eq!(source.fetch("stud.dat").unwrap(), b"0 Stud");
}

#[test]
fn test_lower_case_retry_and_sub_parts() {
    let library = Library::new("case");
    library.write("parts/3001.dat", "0 Brick");
    library.write("parts/s/3001s01.dat", "0 Sub");

    let source = LibrarySource::new(library.root());
    assert_eq!(source.fetch("3001.DAT").unwrap(), b"0 Brick");
    assert_eq!(source.fetch("s/3001s01.dat").unwrap(), b"0 Sub");
    assert_eq!(source.fetch("3001s01.dat").unwrap(), b"0 Sub");
}

#[test]
fn test_existing_path_bypasses_search() {
    let library = Library::new("direct");
    let path = library.write("models/car.ldr", "0 Car");

    let source = LibrarySource::new("/nonexistent-library");
    let name = path.to_string_lossy();
    assert_eq!(source.fetch(&name).unwrap(), b"0 Car");
}

#[test]
fn test_missing_part() {
    let library = Library::new("missing");
    let err = LibrarySource::new(library.root()).fetch("9999.dat").unwrap_err();
    assert!(matches!(err, ParseError::FileNotFound { name } if name == "9999.dat"));
}

#[test]
fn test_parse_from_library() {
    let library = Library::new("parse");
    library.write(
        "parts/3001.dat",
        "0 Brick  2 x  4\r\n0 Name: 3001.dat\r\n0 BFC CERTIFY CW\r\n1 16 0 0 0 1 0 0 0 1 0 0 0 1 s\\3001s01.dat\r\n",
    );
    library.write(
        "parts/s/3001s01.dat",
        "0 ~Brick  2 x  4 without Front Face\r\n0 BFC CERTIFY CW\r\n3 4 0 0 0 1 0 0 0 1 0\r\n",
    );

    let colours = ColourMap::load(library.root().join("LDConfig.ldr")).unwrap();
    assert_eq!(colours.get(4).unwrap().aliases[0].id, 21);

    let parser = PartParser::new(LibrarySource::new(library.root()), colours);
    let part = parser.parse("3001.dat").unwrap();
    assert_eq!(part.default_winding(), Winding::ClockWise);

    let sub = part.commands()[1].as_sub_file().unwrap();
    assert_eq!(sub.part.commands()[1].colour().unwrap().name, "Red");

    let conformed = part.conformed_to(Winding::CounterClockWise);
    assert_eq!(conformed.default_winding(), Winding::CounterClockWise);
}
