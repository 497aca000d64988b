//! Range algebra
//!
//! A [`ScanRange`] describes a contiguous (or singleton) region of the key
//! space. Every variant reduces, through [`ScanRange::to_extent`], to the
//! same canonical form: an optional lower and upper [`KeyBound`], each a
//! key prefix plus an inclusivity flag. The canonical form is what a
//! connector translates into its native scan bounds, and what the
//! [`ScanRange::contains`] predicate is defined against.
//!
//! ## Prefix bounds
//!
//! A [`KeyPrefix`] is an entry key cut at component granularity: a row,
//! optionally narrowed by family, qualifier, visibility, and timestamp, in
//! that order with no gaps. A full key compares against a prefix over the
//! populated components only; a key whose populated components all match
//! falls *inside* the prefix. An inclusive bound admits the inside; an
//! exclusive bound rejects it.
//!
//! Byte-prefix variants (RowPrefix and friends) compute the prefix's
//! immediate lexicographic successor (the smallest byte string greater
//! than every string carrying the prefix) as their exclusive upper bound.
//! A prefix of all `0xFF` bytes has no successor: a row prefix then has no
//! upper bound at all, while family and qualifier prefixes fall back to
//! the end of their enclosing row or column family.

use colonnade_core::{
    ColumnFamily, ColumnIdentifier, ColumnQualifier, EntryKey, EntryVisibility, RowIdentifier,
    Timestamp,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

// ============================================================================
// Canonical bounds
// ============================================================================

/// An entry key cut at component granularity.
///
/// Components are populated left to right (row, family, qualifier,
/// visibility, timestamp) with no gaps; the constructors make any other
/// shape unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPrefix {
    row: RowIdentifier,
    family: Option<ColumnFamily>,
    qualifier: Option<ColumnQualifier>,
    visibility: Option<EntryVisibility>,
    timestamp: Option<Timestamp>,
}

impl KeyPrefix {
    /// A prefix covering one entire row.
    pub const fn row(row: RowIdentifier) -> Self {
        KeyPrefix {
            row,
            family: None,
            qualifier: None,
            visibility: None,
            timestamp: None,
        }
    }

    /// A prefix covering one column family within a row.
    pub const fn family(row: RowIdentifier, family: ColumnFamily) -> Self {
        KeyPrefix {
            row,
            family: Some(family),
            qualifier: None,
            visibility: None,
            timestamp: None,
        }
    }

    /// A prefix covering one column within a row.
    pub fn column(row: RowIdentifier, column: ColumnIdentifier) -> Self {
        let (family, qualifier) = column.into_parts();
        KeyPrefix {
            row,
            family: Some(family),
            qualifier: Some(qualifier),
            visibility: None,
            timestamp: None,
        }
    }

    /// A prefix covering one visibility of one column within a row.
    pub fn visibility(
        row: RowIdentifier,
        column: ColumnIdentifier,
        visibility: EntryVisibility,
    ) -> Self {
        let (family, qualifier) = column.into_parts();
        KeyPrefix {
            row,
            family: Some(family),
            qualifier: Some(qualifier),
            visibility: Some(visibility),
            timestamp: None,
        }
    }

    /// A fully populated prefix: exactly one key.
    pub fn key(key: EntryKey) -> Self {
        let (row, column, visibility, timestamp) = key.into_parts();
        let (family, qualifier) = column.into_parts();
        KeyPrefix {
            row,
            family: Some(family),
            qualifier: Some(qualifier),
            visibility: Some(visibility),
            timestamp: Some(timestamp),
        }
    }

    /// Positions a key relative to the region this prefix covers.
    ///
    /// Returns `Less` if the key sorts before every key matching the
    /// prefix, `Equal` if it matches (all populated components agree), and
    /// `Greater` if it sorts after every matching key. Well defined because
    /// populated components are always the most significant ones in the
    /// entry-key order.
    pub fn position(&self, key: &EntryKey) -> Ordering {
        let ord = key.row().cmp(&self.row);
        if ord != Ordering::Equal {
            return ord;
        }
        let Some(family) = &self.family else {
            return Ordering::Equal;
        };
        let ord = key.family().cmp(family);
        if ord != Ordering::Equal {
            return ord;
        }
        let Some(qualifier) = &self.qualifier else {
            return Ordering::Equal;
        };
        let ord = key.qualifier().cmp(qualifier);
        if ord != Ordering::Equal {
            return ord;
        }
        let Some(visibility) = &self.visibility else {
            return Ordering::Equal;
        };
        let ord = key.visibility().cmp(visibility);
        if ord != Ordering::Equal {
            return ord;
        }
        let Some(timestamp) = self.timestamp else {
            return Ordering::Equal;
        };
        key.timestamp().cmp(&timestamp)
    }
}

/// One side of a key interval: a prefix plus an inclusivity flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBound {
    prefix: KeyPrefix,
    inclusive: bool,
}

impl KeyBound {
    /// A bound that admits keys matching the prefix.
    pub const fn inclusive(prefix: KeyPrefix) -> Self {
        KeyBound {
            prefix,
            inclusive: true,
        }
    }

    /// A bound that rejects keys matching the prefix.
    pub const fn exclusive(prefix: KeyPrefix) -> Self {
        KeyBound {
            prefix,
            inclusive: false,
        }
    }

    /// Returns the bounding prefix.
    pub fn prefix(&self) -> &KeyPrefix {
        &self.prefix
    }

    /// Returns whether keys matching the prefix are admitted.
    pub fn is_inclusive(&self) -> bool {
        self.inclusive
    }
}

/// The canonical form of a scan range: an optional bound on each side.
///
/// `None` on a side means unbounded. Every [`ScanRange`] variant reduces
/// to this form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyExtent {
    lower: Option<KeyBound>,
    upper: Option<KeyBound>,
}

impl KeyExtent {
    /// The extent covering the whole table.
    pub const UNBOUNDED: KeyExtent = KeyExtent {
        lower: None,
        upper: None,
    };

    /// Constructs an extent from explicit bounds.
    pub const fn new(lower: Option<KeyBound>, upper: Option<KeyBound>) -> Self {
        KeyExtent { lower, upper }
    }

    /// The extent covering exactly the keys matching one prefix.
    pub fn around(prefix: KeyPrefix) -> Self {
        KeyExtent {
            lower: Some(KeyBound::inclusive(prefix.clone())),
            upper: Some(KeyBound::inclusive(prefix)),
        }
    }

    /// Returns the lower bound, if any.
    pub fn lower(&self) -> Option<&KeyBound> {
        self.lower.as_ref()
    }

    /// Returns the upper bound, if any.
    pub fn upper(&self) -> Option<&KeyBound> {
        self.upper.as_ref()
    }

    /// Determines whether the key falls within this extent.
    pub fn contains(&self, key: &EntryKey) -> bool {
        if let Some(bound) = &self.lower {
            match bound.prefix.position(key) {
                Ordering::Less => return false,
                Ordering::Equal if !bound.inclusive => return false,
                _ => {}
            }
        }
        if let Some(bound) = &self.upper {
            match bound.prefix.position(key) {
                Ordering::Greater => return false,
                Ordering::Equal if !bound.inclusive => return false,
                _ => {}
            }
        }
        true
    }
}

/// The immediate lexicographic successor of a byte prefix: the smallest
/// byte string greater than every string having `prefix` as a prefix.
///
/// Trailing maximum bytes carry leftward; a prefix that is empty or all
/// `0xFF` has no successor.
fn prefix_successor(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut bytes = prefix.to_vec();
    while let Some(&last) = bytes.last() {
        if last == u8::MAX {
            bytes.pop();
        } else {
            let end = bytes.len() - 1;
            bytes[end] = last + 1;
            return Some(bytes);
        }
    }
    None
}

// ============================================================================
// ScanRange
// ============================================================================

/// A contiguous or singleton region of the key space bounding a scan.
///
/// A closed set of shapes; each translates to a canonical [`KeyExtent`]
/// through [`ScanRange::to_extent`]. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanRange {
    /// The whole table, unbounded on both sides.
    FullTable,
    /// Every key in one row.
    ExactRow(RowIdentifier),
    /// Every key in one column family within a row.
    ExactColumnFamily {
        /// The row to match.
        row: RowIdentifier,
        /// The column family to match.
        family: ColumnFamily,
    },
    /// Every key in one column within a row.
    ExactColumn {
        /// The row to match.
        row: RowIdentifier,
        /// The column to match.
        column: ColumnIdentifier,
    },
    /// Every key with one visibility in one column within a row.
    ExactVisibility {
        /// The row to match.
        row: RowIdentifier,
        /// The column to match.
        column: ColumnIdentifier,
        /// The visibility to match.
        visibility: EntryVisibility,
    },
    /// Every row whose identifier starts with the given bytes.
    RowPrefix(RowIdentifier),
    /// Every column family starting with the given bytes, within a row.
    ColumnFamilyPrefix {
        /// The row to match.
        row: RowIdentifier,
        /// The family byte prefix to match.
        family_prefix: ColumnFamily,
    },
    /// Every qualifier starting with the given bytes, within one family of
    /// one row.
    ColumnQualifierPrefix {
        /// The row to match.
        row: RowIdentifier,
        /// The column family to match.
        family: ColumnFamily,
        /// The qualifier byte prefix to match.
        qualifier_prefix: ColumnQualifier,
    },
    /// Every row greater than or equal to the given identifier.
    MinimumRow(RowIdentifier),
    /// Every row less than or equal to the given identifier.
    MaximumRow(RowIdentifier),
    /// Every row strictly greater than the given identifier.
    RowsAfter(RowIdentifier),
    /// Every row strictly less than the given identifier.
    RowsBefore(RowIdentifier),
    /// All rows between a minimum and maximum.
    RowBounds {
        /// The minimum row.
        minimum: RowIdentifier,
        /// Whether the minimum row is included.
        minimum_inclusive: bool,
        /// The maximum row.
        maximum: RowIdentifier,
        /// Whether the maximum row is included.
        maximum_inclusive: bool,
    },
    /// All entries between a minimum and maximum key, at full key
    /// granularity.
    KeyBounds {
        /// The minimum key.
        minimum: EntryKey,
        /// Whether the minimum key is included.
        minimum_inclusive: bool,
        /// The maximum key.
        maximum: EntryKey,
        /// Whether the maximum key is included.
        maximum_inclusive: bool,
    },
}

impl ScanRange {
    /// Reduces this range to its canonical bounds.
    pub fn to_extent(&self) -> KeyExtent {
        match self {
            ScanRange::FullTable => KeyExtent::UNBOUNDED,
            ScanRange::ExactRow(row) => KeyExtent::around(KeyPrefix::row(row.clone())),
            ScanRange::ExactColumnFamily { row, family } => {
                KeyExtent::around(KeyPrefix::family(row.clone(), family.clone()))
            }
            ScanRange::ExactColumn { row, column } => {
                KeyExtent::around(KeyPrefix::column(row.clone(), column.clone()))
            }
            ScanRange::ExactVisibility {
                row,
                column,
                visibility,
            } => KeyExtent::around(KeyPrefix::visibility(
                row.clone(),
                column.clone(),
                visibility.clone(),
            )),
            ScanRange::RowPrefix(prefix) => KeyExtent::new(
                Some(KeyBound::inclusive(KeyPrefix::row(prefix.clone()))),
                prefix_successor(prefix.as_bytes())
                    .map(|next| KeyBound::exclusive(KeyPrefix::row(RowIdentifier::from(next)))),
            ),
            ScanRange::ColumnFamilyPrefix { row, family_prefix } => KeyExtent::new(
                Some(KeyBound::inclusive(KeyPrefix::family(
                    row.clone(),
                    family_prefix.clone(),
                ))),
                Some(match prefix_successor(family_prefix.as_bytes()) {
                    Some(next) => KeyBound::exclusive(KeyPrefix::family(
                        row.clone(),
                        ColumnFamily::from(next),
                    )),
                    // A saturated family prefix runs to the end of the row.
                    None => KeyBound::inclusive(KeyPrefix::row(row.clone())),
                }),
            ),
            ScanRange::ColumnQualifierPrefix {
                row,
                family,
                qualifier_prefix,
            } => KeyExtent::new(
                Some(KeyBound::inclusive(KeyPrefix::column(
                    row.clone(),
                    ColumnIdentifier::new(family.clone(), qualifier_prefix.clone()),
                ))),
                Some(match prefix_successor(qualifier_prefix.as_bytes()) {
                    Some(next) => KeyBound::exclusive(KeyPrefix::column(
                        row.clone(),
                        ColumnIdentifier::new(family.clone(), ColumnQualifier::from(next)),
                    )),
                    // A saturated qualifier prefix runs to the end of the family.
                    None => KeyBound::inclusive(KeyPrefix::family(row.clone(), family.clone())),
                }),
            ),
            ScanRange::MinimumRow(row) => KeyExtent::new(
                Some(KeyBound::inclusive(KeyPrefix::row(row.clone()))),
                None,
            ),
            ScanRange::MaximumRow(row) => KeyExtent::new(
                None,
                Some(KeyBound::inclusive(KeyPrefix::row(row.clone()))),
            ),
            ScanRange::RowsAfter(row) => KeyExtent::new(
                Some(KeyBound::exclusive(KeyPrefix::row(row.clone()))),
                None,
            ),
            ScanRange::RowsBefore(row) => KeyExtent::new(
                None,
                Some(KeyBound::exclusive(KeyPrefix::row(row.clone()))),
            ),
            ScanRange::RowBounds {
                minimum,
                minimum_inclusive,
                maximum,
                maximum_inclusive,
            } => KeyExtent::new(
                Some(KeyBound {
                    prefix: KeyPrefix::row(minimum.clone()),
                    inclusive: *minimum_inclusive,
                }),
                Some(KeyBound {
                    prefix: KeyPrefix::row(maximum.clone()),
                    inclusive: *maximum_inclusive,
                }),
            ),
            ScanRange::KeyBounds {
                minimum,
                minimum_inclusive,
                maximum,
                maximum_inclusive,
            } => KeyExtent::new(
                Some(KeyBound {
                    prefix: KeyPrefix::key(minimum.clone()),
                    inclusive: *minimum_inclusive,
                }),
                Some(KeyBound {
                    prefix: KeyPrefix::key(maximum.clone()),
                    inclusive: *maximum_inclusive,
                }),
            ),
        }
    }

    /// Determines whether this range contains the given key.
    pub fn contains(&self, key: &EntryKey) -> bool {
        self.to_extent().contains(key)
    }
}

// ============================================================================
// Tests
// ============================================================================
