//! Terminology dictionaries.
//!
//! A dictionary is an ordered mapping from source term to target term for one
//! domain and language pair. It is a snapshot handed in by the caller; nothing
//! in this crate caches or mutates it behind the caller's back.

mod parser;

pub use parser::{DictionaryError, DictionaryScope};

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

use crate::types::TermPair;

/// Ordered source-term to target-term mapping.
///
/// ## Invariant
///
/// `source_term` is unique. Inserting an existing source term replaces its
/// target in place, keeping the entry's original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerminologyDictionary {
    entries: Vec<TermPair>,
    index: HashMap<String, usize>,
}

impl TerminologyDictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update a term.
    ///
    /// Returns the previous target term if `source_term` was already present.
    pub fn insert(
        &mut self,
        source_term: impl Into<String>,
        target_term: impl Into<String>,
    ) -> Option<String> {
        let source_term = source_term.into();
        let target_term = target_term.into();

        if let Some(&pos) = self.index.get(&source_term) {
            return Some(std::mem::replace(
                &mut self.entries[pos].target_term,
                target_term,
            ));
        }

        self.index.insert(source_term.clone(), self.entries.len());
        self.entries.push(TermPair {
            source_term,
            target_term,
        });
        None
    }

    /// Target term for a source term.
    pub fn get(&self, source_term: &str) -> Option<&str> {
        self.index
            .get(source_term)
            .map(|&pos| self.entries[pos].target_term.as_str())
    }

    /// Returns true if the source term is present.
    pub fn contains(&self, source_term: &str) -> bool {
        self.index.contains_key(source_term)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, TermPair> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a TerminologyDictionary {
    type Item = &'a TermPair;
    type IntoIter = std::slice::Iter<'a, TermPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Extend<TermPair> for TerminologyDictionary {
    fn extend<I: IntoIterator<Item = TermPair>>(&mut self, iter: I) {
        for pair in iter {
            self.insert(pair.source_term, pair.target_term);
        }
    }
}

impl FromIterator<TermPair> for TerminologyDictionary {
    fn from_iter<I: IntoIterator<Item = TermPair>>(iter: I) -> Self {
        let mut dictionary = Self::new();
        dictionary.extend(iter);
        dictionary
    }
}

/// Serializes as the simplified `{source: target}` shape, in order.
impl Serialize for TerminologyDictionary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for pair in &self.entries {
            map.serialize_entry(&pair.source_term, &pair.target_term)?;
        }
        map.end()
    }
}
