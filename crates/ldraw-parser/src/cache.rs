// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared cache of parsed parts

use ldraw_model::Part;
use rustc_hash::FxHashMap;
use std::sync::{Arc, RwLock};

/// Normalized cache key: `/` separators, lower case
pub fn part_key(name: &str) -> String {
    name.replace('\\', "/").to_ascii_lowercase()
}

/// Thread-safe cache of parsed parts keyed by normalized name
///
/// Entries are stored once and handed out as deep copies, so two trees never
/// share a sub-part.
#[derive(Default)]
pub struct PartCache {
    parts: RwLock<FxHashMap<String, Arc<Part>>>,
}

impl PartCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the cached part, if present
    pub fn get(&self, name: &str) -> Option<Part> {
        let parts = self.parts.read().ok()?;
        parts.get(&part_key(name)).map(|part| Part::clone(part))
    }

    /// Store a parsed part
    ///
    /// A part already cached under the same name is kept; both parses came
    /// from the same source and are equal.
    pub fn insert(&self, name: &str, part: &Part) {
        if let Ok(mut parts) = self.parts.write() {
            parts
                .entry(part_key(name))
                .or_insert_with(|| Arc::new(part.clone()));
        }
    }

    pub fn len(&self) -> usize {
        self.parts.read().map(|parts| parts.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut parts) = self.parts.write() {
            parts.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ldraw_model::{Command, PartHeader};

    #[test]
    fn test_keys_ignore_case_and_separator() {
        assert_eq!(part_key("S\\3001S01.DAT"), "s/3001s01.dat");
    }

    #[test]
    fn test_get_returns_independent_copy() {
        let cache = PartCache::new();
        let part = Part::new(PartHeader::default(), vec![Command::comment("stud")]);
        cache.insert("Stud.dat", &part);

        let first = cache.get("stud.dat").unwrap();
        let second = cache.get("STUD.DAT").unwrap();
        assert_eq!(first, part);
        assert_eq!(second, part);
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get("stud.dat").is_none());
    }

    #[test]
    fn test_cache_thread_safe() {
        use std::thread;

        let cache = Arc::new(PartCache::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    let part = Part::new(PartHeader::default(), Vec::new());
                    cache.insert(&format!("part{}.dat", i % 2), &part);
                    let _ = cache.get("part0.dat");
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 2);
    }
}
