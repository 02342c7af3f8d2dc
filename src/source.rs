//! Environment variable sources
//!
//! The loader only needs a key to optional string lookup. [`ProcessEnv`] reads
//! the real process environment; map sources are useful for tests and for
//! loading from a captured snapshot.

use crate::error::{LoadError, Result};
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Key to value lookup, `Ok(None)` when the variable is not set
pub trait Lookup {
    fn lookup(&self, key: &str) -> Result<Option<String>>;
}

impl<L: Lookup + ?Sized> Lookup for &L {
    fn lookup(&self, key: &str) -> Result<Option<String>> {
        (**self).lookup(key)
    }
}

impl<L: Lookup + ?Sized> Lookup for Box<L> {
    fn lookup(&self, key: &str) -> Result<Option<String>> {
        (**self).lookup(key)
    }
}

/// The environment of the current process
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Lookup for ProcessEnv {
    fn lookup(&self, key: &str) -> Result<Option<String>> {
        // Such names can never be set, and std may panic on them
        if key.is_empty() || key.contains(['=', '\0']) {
            return Ok(None);
        }

        match std::env::var_os(key) {
            None => Ok(None),
            Some(value) => value.into_string().map(Some).map_err(|_| LoadError::NotUnicode {
                key: key.to_string(),
            }),
        }
    }
}

/// An in-memory environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnv {
    vars: BTreeMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.vars.remove(key)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Lookup for MapEnv {
    fn lookup(&self, key: &str) -> Result<Option<String>> {
        self.vars.lookup(key)
    }
}

impl Lookup for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key).cloned())
    }
}

impl<S: BuildHasher> Lookup for HashMap<String, String, S> {
    fn lookup(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key).cloned())
    }
}
