//! Composite entry keys
//!
//! An [`EntryKey`] is the full coordinate of an entry: row, column
//! (family + qualifier), visibility, and timestamp. Its total order
//! (row, then family, then qualifier, then visibility, then timestamp)
//! matches the physical order entries arrive in from a range scan, which
//! is what the row-reconstruction layer depends on.

use crate::ident::{
    ColumnFamily, ColumnIdentifier, ColumnQualifier, EntryVisibility, RowIdentifier,
};
use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// The key of a single entry in a table.
///
/// Note that the store's delete marker is deliberately omitted; anything
/// that low-level belongs to the store client, not this layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryKey {
    row: RowIdentifier,
    column: ColumnIdentifier,
    visibility: EntryVisibility,
    timestamp: Timestamp,
}

impl EntryKey {
    /// Constructs a key from all of its components.
    pub const fn new(
        row: RowIdentifier,
        column: ColumnIdentifier,
        visibility: EntryVisibility,
        timestamp: Timestamp,
    ) -> Self {
        EntryKey {
            row,
            column,
            visibility,
            timestamp,
        }
    }

    /// Constructs a key with the timestamp left unspecified.
    pub const fn with_visibility(
        row: RowIdentifier,
        column: ColumnIdentifier,
        visibility: EntryVisibility,
    ) -> Self {
        Self::new(row, column, visibility, Timestamp::UNSPECIFIED)
    }

    /// Constructs a key with the default visibility and an unspecified
    /// timestamp.
    pub const fn of(row: RowIdentifier, column: ColumnIdentifier) -> Self {
        Self::with_visibility(row, column, EntryVisibility::DEFAULT)
    }

    /// Returns the row identifier.
    pub fn row(&self) -> &RowIdentifier {
        &self.row
    }

    /// Returns the column identifier.
    pub fn column(&self) -> &ColumnIdentifier {
        &self.column
    }

    /// Returns the column family.
    pub fn family(&self) -> &ColumnFamily {
        self.column.family()
    }

    /// Returns the column qualifier.
    pub fn qualifier(&self) -> &ColumnQualifier {
        self.column.qualifier()
    }

    /// Returns the visibility expression.
    pub fn visibility(&self) -> &EntryVisibility {
        &self.visibility
    }

    /// Returns the timestamp.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Consumes the key, returning its components.
    pub fn into_parts(self) -> (RowIdentifier, ColumnIdentifier, EntryVisibility, Timestamp) {
        (self.row, self.column, self.visibility, self.timestamp)
    }
}

// Row, then column (family, qualifier), then visibility, then timestamp:
// the iteration order of a scan.
impl Ord for EntryKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.row
            .cmp(&other.row)
            .then_with(|| self.column.cmp(&other.column))
            .then_with(|| self.visibility.cmp(&other.visibility))
            .then_with(|| self.timestamp.cmp(&other.timestamp))
    }
}

impl PartialOrd for EntryKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}] @{}",
            self.row, self.column, self.visibility, self.timestamp
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(row: &str, family: &str, qualifier: &str, visibility: &str, ts: i64) -> EntryKey {
        EntryKey::new(
            RowIdentifier::from(row),
            ColumnIdentifier::new(ColumnFamily::from(family), ColumnQualifier::from(qualifier)),
            EntryVisibility::from(visibility),
            Timestamp::specified(ts).unwrap(),
        )
    }

    #[test]
    fn ordering_prioritizes_row_first() {
        assert!(key("a", "z", "z", "z", 9) < key("b", "a", "a", "a", 0));
    }

    #[test]
    fn ordering_falls_through_to_family() {
        assert!(key("r", "a", "z", "z", 9) < key("r", "b", "a", "a", 0));
    }

    #[test]
    fn ordering_falls_through_to_qualifier() {
        assert!(key("r", "f", "a", "z", 9) < key("r", "f", "b", "a", 0));
    }

    #[test]
    fn ordering_falls_through_to_visibility() {
        assert!(key("r", "f", "q", "a", 9) < key("r", "f", "q", "b", 0));
    }

    #[test]
    fn ordering_falls_through_to_timestamp() {
        assert!(key("r", "f", "q", "v", 1) < key("r", "f", "q", "v", 2));

        let unspecified = EntryKey::with_visibility(
            RowIdentifier::from("r"),
            ColumnIdentifier::new(ColumnFamily::from("f"), ColumnQualifier::from("q")),
            EntryVisibility::from("v"),
        );
        assert!(key("r", "f", "q", "v", i64::MAX - 1) < unspecified);
    }

    #[test]
    fn equal_keys_compare_equal() {
        assert_eq!(key("r", "f", "q", "v", 5), key("r", "f", "q", "v", 5));
    }

    #[test]
    fn convenience_constructors_default_the_tail() {
        let k = EntryKey::of(
            RowIdentifier::from("r"),
            ColumnIdentifier::from_family(ColumnFamily::from("f")),
        );
        assert_eq!(k.visibility(), &EntryVisibility::DEFAULT);
        assert_eq!(k.timestamp(), Timestamp::UNSPECIFIED);
    }

    #[test]
    fn accessors_expose_components() {
        let k = key("r", "f", "q", "v", 3);
        assert_eq!(k.row(), &RowIdentifier::from("r"));
        assert_eq!(k.family(), &ColumnFamily::from("f"));
        assert_eq!(k.qualifier(), &ColumnQualifier::from("q"));
        assert_eq!(k.visibility(), &EntryVisibility::from("v"));
        assert_eq!(k.timestamp().value(), Some(3));
    }
}
