//! Key registry and load report
//!
//! The registry lives for one load. It guarantees every canonical key is
//! claimed by at most one leaf field and remembers which variables were set.

use crate::error::{LoadError, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// Keys resolved during a single load
#[derive(Debug, Default)]
pub struct KeyRegistry {
    entries: BTreeMap<String, bool>,
}

impl KeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `key` for a leaf field. The second claim of a key fails.
    pub fn register(&mut self, key: &str) -> Result<()> {
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(_) => Err(LoadError::DuplicateKey {
                key: key.to_string(),
            }),
            Entry::Vacant(entry) => {
                entry.insert(false);
                Ok(())
            }
        }
    }

    /// Record that the variable behind `key` was set.
    ///
    /// Returns `false`, changing nothing, if `key` was never registered.
    pub fn mark_present(&mut self, key: &str) -> bool {
        match self.entries.get_mut(key) {
            Some(present) => {
                *present = true;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Copy of everything recorded so far
    pub fn snapshot(&self) -> LoadReport {
        LoadReport {
            statuses: self.entries.clone(),
        }
    }
}

/// Which environment variables a load consulted and whether each was set.
///
/// Serializes as a flat JSON object of key to boolean.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LoadReport {
    statuses: BTreeMap<String, bool>,
}

impl LoadReport {
    /// Whether `key` was set, `None` if the load never consulted it
    pub fn get(&self, key: &str) -> Option<bool> {
        self.statuses.get(key).copied()
    }

    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).unwrap_or(false)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.statuses.contains_key(key)
    }

    /// Keys in lexical order with their presence
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.statuses.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.statuses.keys().map(String::as_str)
    }

    pub fn set_keys(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|(_, set)| *set).map(|(k, _)| k)
    }

    pub fn unset_keys(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|(_, set)| !*set).map(|(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    pub fn as_map(&self) -> &BTreeMap<String, bool> {
        &self.statuses
    }
}

impl From<LoadReport> for BTreeMap<String, bool> {
    fn from(report: LoadReport) -> Self {
        report.statuses
    }
}

impl<'a> IntoIterator for &'a LoadReport {
    type Item = (&'a str, bool);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, bool)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
