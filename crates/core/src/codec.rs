//! Raw codec boundary
//!
//! [`RawKey`] and [`RawEntry`] mirror the store's native key/value
//! representation: plain byte vectors for each key component plus the
//! integer timestamp. The mappings to and from the typed model are
//! structural, order-preserving, and total: bytes are opaque here, and no
//! character-set validation is performed in either direction.

use crate::entry::Entry;
use crate::ident::{
    ColumnFamily, ColumnIdentifier, ColumnQualifier, EntryValue, EntryVisibility, RowIdentifier,
};
use crate::key::EntryKey;
use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

/// A key in the store's native representation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawKey {
    /// Row bytes.
    pub row: Vec<u8>,
    /// Column family bytes.
    pub family: Vec<u8>,
    /// Column qualifier bytes.
    pub qualifier: Vec<u8>,
    /// Visibility expression bytes.
    pub visibility: Vec<u8>,
    /// Raw timestamp; `i64::MAX` means unspecified.
    pub timestamp: i64,
}

/// An entry in the store's native representation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntry {
    /// The entry's key.
    pub key: RawKey,
    /// The entry's value bytes.
    pub value: Vec<u8>,
}

impl From<RawKey> for EntryKey {
    fn from(raw: RawKey) -> Self {
        EntryKey::new(
            RowIdentifier::from(raw.row),
            ColumnIdentifier::new(
                ColumnFamily::from(raw.family),
                ColumnQualifier::from(raw.qualifier),
            ),
            EntryVisibility::from(raw.visibility),
            Timestamp::from_raw(raw.timestamp),
        )
    }
}

impl From<EntryKey> for RawKey {
    fn from(key: EntryKey) -> Self {
        let (row, column, visibility, timestamp) = key.into_parts();
        let (family, qualifier) = column.into_parts();
        RawKey {
            row: row.into_byte_sequence().into_vec(),
            family: family.into_byte_sequence().into_vec(),
            qualifier: qualifier.into_byte_sequence().into_vec(),
            visibility: visibility.into_byte_sequence().into_vec(),
            timestamp: timestamp.raw(),
        }
    }
}

impl From<RawEntry> for Entry {
    fn from(raw: RawEntry) -> Self {
        Entry::new(EntryKey::from(raw.key), EntryValue::from(raw.value))
    }
}

impl From<Entry> for RawEntry {
    fn from(entry: Entry) -> Self {
        let (key, value) = entry.into_parts();
        RawEntry {
            key: RawKey::from(key),
            value: value.into_byte_sequence().into_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_entry() -> RawEntry {
        RawEntry {
            key: RawKey {
                row: b"row-1".to_vec(),
                family: b"meta".to_vec(),
                qualifier: b"size".to_vec(),
                visibility: b"public".to_vec(),
                timestamp: 1_234,
            },
            value: vec![0xde, 0xad],
        }
    }

    #[test]
    fn decoding_is_structural() {
        let entry = Entry::from(raw_entry());
        assert_eq!(entry.key().row(), &RowIdentifier::from("row-1"));
        assert_eq!(entry.key().family(), &ColumnFamily::from("meta"));
        assert_eq!(entry.key().qualifier(), &ColumnQualifier::from("size"));
        assert_eq!(entry.key().visibility(), &EntryVisibility::from("public"));
        assert_eq!(entry.key().timestamp().value(), Some(1_234));
        assert_eq!(entry.value().as_bytes(), &[0xde, 0xad]);
    }

    #[test]
    fn round_trip_preserves_everything() {
        let raw = raw_entry();
        let back = RawEntry::from(Entry::from(raw.clone()));
        assert_eq!(back, raw);
    }

    #[test]
    fn sentinel_timestamp_decodes_as_unspecified() {
        let mut raw = raw_entry();
        raw.key.timestamp = i64::MAX;
        let entry = Entry::from(raw);
        assert_eq!(entry.key().timestamp(), Timestamp::UNSPECIFIED);
        assert_eq!(RawKey::from(entry.key().clone()).timestamp, i64::MAX);
    }

    #[test]
    fn invalid_utf8_is_accepted_as_is() {
        let mut raw = raw_entry();
        raw.key.row = vec![0xff, 0x00, 0xfe];
        let entry = Entry::from(raw.clone());
        assert_eq!(entry.key().row().as_bytes(), &[0xff, 0x00, 0xfe]);
        assert_eq!(RawEntry::from(entry), raw);
    }
}
