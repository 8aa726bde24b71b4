use std::fmt;
use std::sync::{PoisonError, RwLock};

use once_cell::sync::Lazy;
use string_interner::{DefaultBackend, DefaultSymbol, StringInterner};

use crate::hash::hash_str;

static NAMES: Lazy<RwLock<StringInterner<DefaultBackend>>> =
    Lazy::new(|| RwLock::new(StringInterner::default()));

/// A keyword or symbol name interned in the process-wide name table.
///
/// Equality is a single integer compare. The content hash is computed once at
/// interning time so hashing a name never touches the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InternedName {
    id: DefaultSymbol,
    hash: u64,
}

impl InternedName {
    pub fn new(name: &str) -> Self {
        // Interning is append-only, so a poisoned table is still consistent.
        let mut names = NAMES.write().unwrap_or_else(PoisonError::into_inner);
        InternedName {
            id: names.get_or_intern(name),
            hash: hash_str(name),
        }
    }

    /// Content hash of the name, independent of interning order.
    pub fn content_hash(&self) -> u64 {
        self.hash
    }

    pub fn resolve(&self) -> String {
        self.with_str(str::to_owned)
    }

    /// Runs `f` against the name without allocating.
    pub fn with_str<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&str) -> R,
    {
        let names = NAMES.read().unwrap_or_else(PoisonError::into_inner);
        // Ids only come from `new`, so resolution cannot miss.
        f(names.resolve(self.id).unwrap_or_default())
    }
}

impl fmt::Display for InternedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with_str(|s| f.write_str(s))
    }
}
