//! String interning for keyword and field names.
//!
//! Keyword names (`CHARACTERISTIC`, `COMPU_METHOD`, …) and attribute field
//! names repeat constantly across a document and across the registry itself,
//! so both are represented as [`Name`] — a small, cheaply-cloned string
//! (`smol_str::SmolStr` inlines short strings, which covers essentially every
//! A2L identifier) rather than a heap-allocated `String`.

use smol_str::SmolStr;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(SmolStr);

impl Name {
    pub fn new(s: impl AsRef<str>) -> Self {
        Self(SmolStr::new(s.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Name {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::borrow::Borrow<str> for Name {
    fn borrow(&self) -> &str {
        self.0.as_str()
    }
}

/// A simple deduplicating string pool, used where a parse wants to avoid
/// holding many equal `Name`s (e.g. recording a document's distinct
/// identifiers for diagnostics).
#[derive(Debug, Default)]
pub struct Interner {
    pool: HashSet<Name>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, s: &str) -> Name {
        if let Some(existing) = self.pool.get(s) {
            return existing.clone();
        }
        let name = Name::new(s);
        self.pool.insert(name.clone());
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_dedupes() {
        let mut interner = Interner::new();
        let a = interner.intern("CHARACTERISTIC");
        let b = interner.intern("CHARACTERISTIC");
        assert_eq!(a, b);
        assert_eq!(interner.pool.len(), 1);
    }
}
