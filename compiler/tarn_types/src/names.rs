//! Interned field names.
//!
//! Field names are interned once and passed around as 32-bit handles.
//! The blank name `_` is pre-interned at index 0 so blankness is an O(1)
//! check on the handle itself, with no table access.

use std::fmt;

use rustc_hash::FxHashMap;

/// An interned name handle.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// The blank name `_`. Blank fields are skipped by equality synthesis
    /// and exclude their struct from bulk memory comparison.
    pub const BLANK: Self = Self(0);

    /// Create a name from a raw u32 value.
    ///
    /// The caller must ensure the index is valid in the interner.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if this is the blank name `_`.
    #[inline]
    pub const fn is_blank(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_blank() {
            write!(f, "Name::BLANK")
        } else {
            write!(f, "Name({})", self.0)
        }
    }
}

/// Name interner.
///
/// Deduplicates strings and hands out [`Name`] handles. `_` lives at
/// index 0 from construction.
#[derive(Default)]
pub struct Names {
    map: FxHashMap<String, Name>,
    strings: Vec<String>,
}

impl Names {
    /// Create an interner with `_` pre-interned as [`Name::BLANK`].
    pub fn new() -> Self {
        let mut names = Self {
            map: FxHashMap::default(),
            strings: Vec::new(),
        };
        let blank = names.intern("_");
        debug_assert_eq!(blank, Name::BLANK);
        names
    }

    /// Intern a string, returning its handle. Idempotent.
    #[allow(clippy::cast_possible_truncation)]
    pub fn intern(&mut self, s: &str) -> Name {
        if let Some(&name) = self.map.get(s) {
            return name;
        }
        let name = Name(self.strings.len() as u32);
        self.strings.push(s.to_owned());
        self.map.insert(s.to_owned(), name);
        name
    }

    /// Resolve a handle back to its string.
    pub fn resolve(&self, name: Name) -> &str {
        &self.strings[name.0 as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_is_preinterned() {
        let mut names = Names::new();
        assert_eq!(names.intern("_"), Name::BLANK);
        assert!(Name::BLANK.is_blank());
    }

    #[test]
    fn intern_deduplicates() {
        let mut names = Names::new();
        let a = names.intern("x");
        let b = names.intern("x");
        let c = names.intern("y");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(names.resolve(a), "x");
        assert!(!a.is_blank());
    }
}
