//! Configuration sections and per-extension configuration maps.
//!
//! # Invariants
//! - A section keeps its entries in declaration order, duplicates included.
//! - A map holds unique keys in first-insertion order; re-inserting a key
//!   replaces the value in place.

use serde::{Deserialize, Serialize};

/// One raw `key = value` setting inside a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingEntry {
    pub key: String,
    pub value: String,
}

/// Immutable ordered key/value pairs loaded for one extension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigurationSection {
    entries: Vec<SettingEntry>,
}

impl ConfigurationSection {
    /// Creates the empty section used when no configuration exists.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(key, value)| SettingEntry {
                    key: key.into(),
                    value: value.into(),
                })
                .collect(),
        }
    }

    pub fn entries(&self) -> &[SettingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Mutable string map accumulated for one extension during a bind pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigurationMap {
    entries: Vec<(String, String)>,
}

impl ConfigurationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Appends every section entry in order, last write wins.
    pub fn extend_from_section(&mut self, section: &ConfigurationSection) {
        for entry in section.entries() {
            self.insert(entry.key.as_str(), entry.value.as_str());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ConfigurationMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}
