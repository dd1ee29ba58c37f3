//! Insertion-ordered attribute storage.
//!
//! Attribute lists are short, so a `Vec` with linear lookup keeps the source
//! order for serialization without a hashing dependency.

use std::collections::HashSet;

/// A single attribute: lowercase name plus an optional unescaped value.
///
/// `value` is `None` for a valueless (boolean) attribute such as `disabled`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Lowercase attribute name.
    pub name: String,
    /// Unescaped value, or `None` when the attribute was written bare.
    pub value: Option<String>,
}

/// Map of attribute names to values for an element, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributesMap {
    entries: Vec<Attribute>,
}

impl AttributesMap {
    /// Create an empty attribute map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the map has no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value of `name`. A valueless attribute reads as the empty string.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entry(name)
            .map(|attr| attr.value.as_deref().unwrap_or(""))
    }

    /// The full entry for `name`, distinguishing `a=""` from bare `a`.
    #[must_use]
    pub fn entry(&self, name: &str) -> Option<&Attribute> {
        self.entries
            .iter()
            .find(|attr| attr.name.eq_ignore_ascii_case(name))
    }

    /// True if an attribute called `name` is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    /// Set `name` to `value`. The name is lowercased. An existing entry keeps
    /// its position and has its value overwritten.
    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) {
        let name = name.into().to_ascii_lowercase();
        if let Some(existing) = self.entries.iter_mut().find(|attr| attr.name == name) {
            existing.value = value;
        } else {
            self.entries.push(Attribute { name, value });
        }
    }

    /// Insert only if `name` is not already present.
    ///
    /// Returns `false` when the name was taken. The tree builder uses this
    /// so the first occurrence of a duplicated attribute wins.
    pub fn insert_if_absent(&mut self, name: impl Into<String>, value: Option<String>) -> bool {
        let name = name.into().to_ascii_lowercase();
        if self.entries.iter().any(|attr| attr.name == name) {
            return false;
        }
        self.entries.push(Attribute { name, value });
        true
    }

    /// Remove `name`, returning its entry if it was present.
    pub fn remove(&mut self, name: &str) -> Option<Attribute> {
        let index = self
            .entries
            .iter()
            .position(|attr| attr.name.eq_ignore_ascii_case(name))?;
        Some(self.entries.remove(index))
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|attr| (attr.name.as_str(), attr.value.as_deref()))
    }

    /// Iterate over attribute names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|attr| attr.name.as_str())
    }

    /// Whitespace-separated tokens of the `class` attribute.
    #[must_use]
    pub fn classes(&self) -> HashSet<&str> {
        self.get("class")
            .map(|list| list.split_ascii_whitespace().collect())
            .unwrap_or_default()
    }

    /// Re-lowercase every name, merging collisions (first entry wins).
    ///
    /// Used when a caller-built map is installed wholesale on an element.
    #[must_use]
    pub fn normalized(self) -> Self {
        let mut out = Self::new();
        for attr in self.entries {
            let _ = out.insert_if_absent(attr.name, attr.value);
        }
        out
    }
}

impl<'a> IntoIterator for &'a AttributesMap {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for AttributesMap {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.insert(name, Some(value.into()));
        }
        map
    }
}
