//! Immutable byte buffer with unsigned lexicographic ordering
//!
//! [`ByteSequence`] is the value class underneath every key and value
//! component in the store. Bytes are opaque: no character-set validation
//! happens here, and string conversion is a separate, fallible convenience.
//!
//! ## Ordering contract
//!
//! Sequences sort lexicographically on the unsigned value of each byte,
//! with a shorter sequence sorting before any longer sequence it prefixes.
//! This matches the order keys are laid out in the store, so every range
//! computation in the scan layer leans on it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::Utf8Error;

/// An immutable sequence of bytes.
///
/// Constructed by copying from borrowed data or taking ownership of a
/// `Vec<u8>`; never mutated afterwards. Conversions out always produce a
/// fresh copy, so no aliasing with caller-owned buffers exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ByteSequence(Vec<u8>);

impl ByteSequence {
    /// The empty byte sequence.
    pub const EMPTY: ByteSequence = ByteSequence(Vec::new());

    /// Creates an empty byte sequence.
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Constructs a `ByteSequence` by copying the given slice.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        ByteSequence(bytes.to_vec())
    }

    /// Constructs a `ByteSequence` by taking ownership of the given vector.
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        ByteSequence(bytes)
    }

    /// Returns the bytes as a slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Copies the bytes into a fresh vector.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.clone()
    }

    /// Consumes the sequence, returning the underlying vector.
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    /// Returns the number of bytes in the sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the sequence contains no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Interprets the bytes as UTF-8 text.
    ///
    /// This is the strict conversion; use the `Display` implementation for
    /// a lossy rendering of arbitrary bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not valid UTF-8.
    pub fn to_utf8(&self) -> Result<&str, Utf8Error> {
        std::str::from_utf8(&self.0)
    }
}

impl fmt::Display for ByteSequence {
    /// Renders the bytes as UTF-8 text, substituting the replacement
    /// character for invalid sequences.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

impl From<&[u8]> for ByteSequence {
    fn from(bytes: &[u8]) -> Self {
        ByteSequence::from_bytes(bytes)
    }
}

impl From<Vec<u8>> for ByteSequence {
    fn from(bytes: Vec<u8>) -> Self {
        ByteSequence::from_vec(bytes)
    }
}

impl From<&str> for ByteSequence {
    fn from(text: &str) -> Self {
        ByteSequence(text.as_bytes().to_vec())
    }
}

impl From<String> for ByteSequence {
    fn from(text: String) -> Self {
        ByteSequence(text.into_bytes())
    }
}

impl AsRef<[u8]> for ByteSequence {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
