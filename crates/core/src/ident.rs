//! Typed wrappers around byte sequences
//!
//! The store keys everything by raw bytes, but a row identifier, a column
//! family, a qualifier, a visibility expression, and a value are not
//! interchangeable just because they share a representation. Each wrapper
//! here is a distinct newtype over [`ByteSequence`]; two wrappers of
//! different kinds are never equal or comparable, even when they hold
//! identical bytes.
//!
//! All wrappers share the same construction and conversion surface,
//! generated by a local macro, and delegate equality and ordering to the
//! underlying byte sequence.

use crate::bytes::ByteSequence;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

macro_rules! byte_wrapper {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(ByteSequence);

        impl $name {
            /// The empty value, typically indicating an unused key part.
            pub const EMPTY: $name = $name(ByteSequence::EMPTY);

            /// Wraps an existing byte sequence.
            pub const fn new(bytes: ByteSequence) -> Self {
                $name(bytes)
            }

            /// Constructs a value by copying the given slice.
            pub fn from_bytes(bytes: &[u8]) -> Self {
                $name(ByteSequence::from_bytes(bytes))
            }

            /// Returns the underlying byte sequence.
            pub fn as_byte_sequence(&self) -> &ByteSequence {
                &self.0
            }

            /// Consumes the wrapper, returning the underlying byte sequence.
            pub fn into_byte_sequence(self) -> ByteSequence {
                self.0
            }

            /// Returns the raw bytes.
            pub fn as_bytes(&self) -> &[u8] {
                self.0.as_bytes()
            }

            /// Copies the raw bytes into a fresh vector.
            pub fn to_vec(&self) -> Vec<u8> {
                self.0.to_vec()
            }

            /// Returns `true` if the wrapped sequence is empty.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<ByteSequence> for $name {
            fn from(bytes: ByteSequence) -> Self {
                $name(bytes)
            }
        }

        impl From<&[u8]> for $name {
            fn from(bytes: &[u8]) -> Self {
                $name(ByteSequence::from_bytes(bytes))
            }
        }

        impl From<Vec<u8>> for $name {
            fn from(bytes: Vec<u8>) -> Self {
                $name(ByteSequence::from_vec(bytes))
            }
        }

        impl From<&str> for $name {
            fn from(text: &str) -> Self {
                $name(ByteSequence::from(text))
            }
        }

        impl From<String> for $name {
            fn from(text: String) -> Self {
                $name(ByteSequence::from(text))
            }
        }
    };
}

byte_wrapper! {
    /// The identifier of a row in a table.
    RowIdentifier
}

byte_wrapper! {
    /// The family half of a column key.
    ColumnFamily
}

byte_wrapper! {
    /// The qualifier half of a column key.
    ColumnQualifier
}

byte_wrapper! {
    /// An opaque, byte-encoded visibility expression attached to an entry.
    ///
    /// No validation of the expression is performed at this layer.
    EntryVisibility
}

byte_wrapper! {
    /// The value bytes of an entry.
    EntryValue
}

impl EntryVisibility {
    /// The empty visibility, making an entry visible to all scanners.
    pub const DEFAULT: EntryVisibility = EntryVisibility::EMPTY;
}

/// A column key: family plus qualifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnIdentifier {
    family: ColumnFamily,
    qualifier: ColumnQualifier,
}

impl ColumnIdentifier {
    /// Constructs a column identifier from a family and qualifier.
    pub const fn new(family: ColumnFamily, qualifier: ColumnQualifier) -> Self {
        ColumnIdentifier { family, qualifier }
    }

    /// Constructs a column identifier with an empty qualifier.
    pub const fn from_family(family: ColumnFamily) -> Self {
        ColumnIdentifier {
            family,
            qualifier: ColumnQualifier::EMPTY,
        }
    }

    /// Returns the column family.
    pub fn family(&self) -> &ColumnFamily {
        &self.family
    }

    /// Returns the column qualifier.
    pub fn qualifier(&self) -> &ColumnQualifier {
        &self.qualifier
    }

    /// Consumes the identifier, returning its parts.
    pub fn into_parts(self) -> (ColumnFamily, ColumnQualifier) {
        (self.family, self.qualifier)
    }
}

// Orders by family, then qualifier, matching the layout of columns within
// a row in the store.
impl Ord for ColumnIdentifier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.family
            .cmp(&other.family)
            .then_with(|| self.qualifier.cmp(&other.qualifier))
    }
}

impl PartialOrd for ColumnIdentifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ColumnIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.family, self.qualifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrappers_delegate_ordering_to_bytes() {
        let a = RowIdentifier::from("apple");
        let b = RowIdentifier::from("banana");
        assert!(a < b);
        assert_eq!(a, RowIdentifier::from_bytes(b"apple"));
    }

    #[test]
    fn empty_constants() {
        assert!(RowIdentifier::EMPTY.is_empty());
        assert!(ColumnFamily::EMPTY.is_empty());
        assert!(ColumnQualifier::EMPTY.is_empty());
        assert_eq!(EntryVisibility::DEFAULT, EntryVisibility::EMPTY);
        assert!(EntryValue::EMPTY.is_empty());
    }

    #[test]
    fn wrapper_round_trips_byte_sequence() {
        let bytes = ByteSequence::from_bytes(&[1, 2, 3]);
        let family = ColumnFamily::new(bytes.clone());
        assert_eq!(family.as_byte_sequence(), &bytes);
        assert_eq!(family.into_byte_sequence(), bytes);
    }

    #[test]
    fn column_identifier_orders_family_then_qualifier() {
        let a = ColumnIdentifier::new(ColumnFamily::from("a"), ColumnQualifier::from("z"));
        let b = ColumnIdentifier::new(ColumnFamily::from("b"), ColumnQualifier::from("a"));
        assert!(a < b);

        let c = ColumnIdentifier::new(ColumnFamily::from("a"), ColumnQualifier::from("a"));
        assert!(c < a);
    }

    #[test]
    fn from_family_leaves_qualifier_empty() {
        let column = ColumnIdentifier::from_family(ColumnFamily::from("attrs"));
        assert_eq!(column.qualifier(), &ColumnQualifier::EMPTY);
    }

    #[test]
    fn display_joins_family_and_qualifier() {
        let column = ColumnIdentifier::new(ColumnFamily::from("meta"), ColumnQualifier::from("size"));
        assert_eq!(column.to_string(), "meta:size");
    }
}
