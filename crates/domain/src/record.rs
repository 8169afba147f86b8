//! Records decoded from (or destined for) the wire
//!
//! A [`Block`] is one logical record: an ordered list of key/value pairs,
//! e.g. one ticket, one search-result row, or one conflict candidate.
//! Order matters on the wire, so pairs are kept as an ordered sequence
//! rather than a hash map. `Block` is also the payload type for outgoing
//! POSTs, which is where its mutators come in.
//!
//! A [`RecordView`] is a read-only borrow of one block inside a decoded
//! [`crate::Response`], with typed lookups and the `CF.{name}` shorthand
//! for RT custom fields.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

fn custom_key(name: &str) -> String {
    format!("CF.{{{name}}}")
}

/// One decoded logical record: an ordered sequence of key/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Block {
    pairs: Vec<(String, String)>,
}

impl Block {
    /// Creates an empty block.
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Sets a field, replacing an existing value in place so field order
    /// is preserved, or appending when the key is new.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Returns the value of a field, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns a custom field, shorthand for `get("CF.{name}")`.
    #[must_use]
    pub fn get_custom(&self, name: &str) -> Option<&str> {
        self.get(&custom_key(name))
    }

    /// Sets a custom field, shorthand for `insert("CF.{name}", value)`.
    pub fn set_custom(&mut self, name: &str, value: impl Into<String>) {
        self.insert(custom_key(name), value);
    }

    /// Returns the field names in sorted order for deterministic iteration.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.pairs.iter().map(|(k, _)| k.as_str()).collect();
        keys.sort_unstable();
        keys
    }

    /// Returns the pairs as a map, last value winning for duplicate keys.
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, String> {
        self.pairs.iter().cloned().collect()
    }

    /// Iterates the pairs in wire order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of pairs in the block.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if the block holds no pairs.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Appends a pair without checking for an existing key.
    ///
    /// Decoded wire blocks may legitimately repeat a key; the decoder uses
    /// this to keep every occurrence.
    pub(crate) fn push(&mut self, key: String, value: String) {
        self.pairs.push((key, value));
    }

    pub(crate) fn last_value_mut(&mut self) -> Option<&mut String> {
        self.pairs.last_mut().map(|(_, v)| v)
    }
}

impl FromIterator<(String, String)> for Block {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Block {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// Read-only accessor over one block of a decoded response.
///
/// The view borrows from the response it came from, so it cannot outlive
/// it. Lookups miss with a typed [`DomainError::FieldNotFound`] rather
/// than a silent default.
#[derive(Debug, Clone, Copy)]
pub struct RecordView<'a> {
    block: &'a Block,
}

impl<'a> RecordView<'a> {
    /// Wraps one block.
    #[must_use]
    pub const fn new(block: &'a Block) -> Self {
        Self { block }
    }

    /// Returns the value of a field.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::FieldNotFound`] if the field is absent.
    pub fn get(&self, key: &str) -> DomainResult<&'a str> {
        self.block
            .get(key)
            .ok_or_else(|| DomainError::FieldNotFound(key.to_string()))
    }

    /// Returns a custom field, shorthand for `get("CF.{name}")`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::FieldNotFound`] if the field is absent.
    pub fn get_custom(&self, name: &str) -> DomainResult<&'a str> {
        self.get(&custom_key(name))
    }

    /// Returns the field names in sorted order.
    #[must_use]
    pub fn keys(&self) -> Vec<&'a str> {
        self.block.keys()
    }

    /// Returns the record as a map.
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, String> {
        self.block.to_map()
    }
}
