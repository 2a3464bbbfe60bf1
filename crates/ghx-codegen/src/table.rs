//! Case-insensitive, order-preserving name table

use indexmap::IndexMap;

/// A map keyed by names compared without regard to case.
///
/// Iteration follows first-insertion order and yields names as they were
/// last written. Re-inserting a name in a different case replaces the value
/// in place.
#[derive(Debug, Clone)]
pub struct NameTable<V> {
    entries: IndexMap<String, (String, V)>,
}

impl<V> Default for NameTable<V> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<V> NameTable<V> {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    fn fold(name: &str) -> String {
        name.to_lowercase()
    }

    /// Insert or replace; returns the previous value for this name
    pub fn insert(&mut self, name: impl Into<String>, value: V) -> Option<V> {
        let name = name.into();
        self.entries
            .insert(Self::fold(&name), (name, value))
            .map(|(_, old)| old)
    }

    /// Look up a value by name, ignoring case
    pub fn get(&self, name: &str) -> Option<&V> {
        self.entries.get(&Self::fold(name)).map(|(_, v)| v)
    }

    /// True if the name is present, ignoring case
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&Self::fold(name))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.values().map(|(name, v)| (name.as_str(), v))
    }

    /// Entries sorted by name, ignoring case.
    ///
    /// Names compare by their upper-cased form, so `_` sorts after letters.
    pub fn iter_sorted(&self) -> impl Iterator<Item = (&str, &V)> {
        let mut sorted: Vec<_> = self.entries.values().collect();
        sorted.sort_by_cached_key(|(name, _)| name.to_uppercase());
        sorted.into_iter().map(|(name, v)| (name.as_str(), v))
    }
}
