//! Macro sets and literal macro substitution.
//!
//! Templates are plain text with `!Name!` tokens. A [`MacroSet`] maps names
//! to replacement text; [`MacroSet::apply`] walks the set in order and
//! replaces every occurrence of each token in turn.
//!
//! ## Sequential Passes
//!
//! Each entry is applied to the output of the previous entry, not to the
//! original template. A value that contains another macro's token text is
//! therefore expanded again if that macro comes later in the set:
//!
//! ```text
//! set:      A → "!B!", B → "x"
//! template: "!A!"
//! result:   "x"        (A then B)
//! ```
//!
//! Reversing the order of `A` and `B` leaves `"!B!"` in the output. Existing
//! templates may depend on either outcome, so the order of a set is part of
//! its meaning.
//!
//! ## Combining
//!
//! [`combine`] merges sets left to right. A later set overrides the value of
//! a name already present, but the name keeps the position where it was
//! first seen.
//!
//! Names must not contain [`DELIMITER`].

use indexmap::IndexMap;

/// Character wrapped around a macro name to form its token.
pub const DELIMITER: char = '!';

/// Token text searched for in templates, e.g. `"Venue"` → `"!Venue!"`.
pub fn token(name: &str) -> String {
    format!("{DELIMITER}{name}{DELIMITER}")
}

/// An ordered name → replacement mapping, built fresh for each output file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacroSet {
    entries: IndexMap<String, String>,
}

impl MacroSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`.
    ///
    /// An existing name keeps its position and takes the new value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        debug_assert!(
            !name.contains(DELIMITER),
            "macro name {name:?} contains the delimiter"
        );
        self.entries.insert(name, value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names in iteration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Substitute every macro into `template`, one entry at a time.
    ///
    /// Tokens with no matching entry are left as they are.
    pub fn apply(&self, template: &str) -> String {
        let mut text = template.to_string();
        for (name, value) in &self.entries {
            let needle = token(name);
            if text.contains(&needle) {
                text = text.replace(&needle, value);
            }
        }
        text
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MacroSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = MacroSet::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}

/// Merge sets left to right: later values win, first-seen order is kept.
pub fn combine<'a>(sets: impl IntoIterator<Item = &'a MacroSet>) -> MacroSet {
    let mut merged = MacroSet::new();
    for set in sets {
        for (name, value) in set.iter() {
            merged.insert(name, value);
        }
    }
    merged
}
