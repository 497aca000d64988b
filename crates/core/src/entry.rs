//! Key-value entries
//!
//! An [`Entry`] pairs an [`EntryKey`] with its value bytes; it is the
//! atomic unit read from or written to the store.

use crate::ident::EntryValue;
use crate::key::EntryKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single entry (key-value pair) stored in a table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    key: EntryKey,
    value: EntryValue,
}

impl Entry {
    /// Constructs an entry from a key and value.
    pub const fn new(key: EntryKey, value: EntryValue) -> Self {
        Entry { key, value }
    }

    /// Returns the key.
    pub fn key(&self) -> &EntryKey {
        &self.key
    }

    /// Returns the value.
    pub fn value(&self) -> &EntryValue {
        &self.value
    }

    /// Consumes the entry, returning its key and value.
    pub fn into_parts(self) -> (EntryKey, EntryValue) {
        (self.key, self.value)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.key, self.value)
    }
}
