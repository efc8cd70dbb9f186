//! String interner for identifiers and member names.
//!
//! Names are resolved on every variable lookup and property access, so the
//! evaluator compares `u32` handles instead of strings. Interned text is
//! leaked to obtain `&'static str`; the set of identifiers in a program is
//! small and bounded by its source.

use super::Name;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

struct Table {
    map: FxHashMap<&'static str, Name>,
    strings: Vec<&'static str>,
}

/// Thread-safe string interner.
///
/// The interpreter itself is single-threaded, but an interner is shared
/// between the parser and evaluator and may outlive either, so it sits
/// behind an `RwLock` and is handed around as [`SharedInterner`].
pub struct StringInterner {
    table: RwLock<Table>,
}

/// Interner shared between a parser and the interpreters that run its output.
pub type SharedInterner = Arc<StringInterner>;

impl StringInterner {
    pub fn new() -> Self {
        let mut map = FxHashMap::default();
        map.insert("", Name::EMPTY);
        StringInterner {
            table: RwLock::new(Table {
                map,
                strings: vec![""],
            }),
        }
    }

    /// New interner wrapped for sharing.
    pub fn shared() -> SharedInterner {
        Arc::new(Self::new())
    }

    /// Intern `text`, returning the existing handle when already present.
    pub fn intern(&self, text: &str) -> Name {
        if let Some(&name) = self.table.read().map.get(text) {
            return name;
        }

        let mut table = self.table.write();
        if let Some(&name) = table.map.get(text) {
            return name;
        }

        let leaked: &'static str = Box::leak(text.to_owned().into_boxed_str());
        #[expect(
            clippy::cast_possible_truncation,
            reason = "identifier count is bounded by source size, which is below u32::MAX"
        )]
        let name = Name::from_raw(table.strings.len() as u32);
        table.strings.push(leaked);
        table.map.insert(leaked, name);
        name
    }

    /// Text of an interned name. Unknown handles resolve to `""`.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.table
            .read()
            .strings
            .get(name.index())
            .copied()
            .unwrap_or("")
    }

    /// Handle for `text` only if it was interned before.
    pub fn get(&self, text: &str) -> Option<Name> {
        self.table.read().map.get(text).copied()
    }

    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}
