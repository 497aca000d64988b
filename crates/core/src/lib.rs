//! Data model for the Colonnade store client
//!
//! This crate defines the ordered entry model shared by every scan and
//! mutation a client issues against the store:
//! - ByteSequence: immutable byte buffer with unsigned lexicographic order
//! - RowIdentifier, ColumnFamily, ColumnQualifier, EntryVisibility,
//!   EntryValue: typed wrappers that keep semantically distinct byte
//!   strings from being mixed up
//! - Timestamp: version marker with a reserved "unspecified" sentinel
//! - EntryKey / Entry: the atomic unit read from or written to the store
//! - Row / RowBuilder: collapses a run of entries into one value per column
//! - RawKey / RawEntry: the store's native representation at the codec
//!   boundary
//! - TableName: validated table identity
//!
//! Everything here is an immutable value type; the only mutable phase is
//! [`RowBuilder`], which freezes into an immutable [`Row`] on build.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bytes;
pub mod codec;
pub mod entry;
pub mod error;
pub mod ident;
pub mod key;
pub mod row;
pub mod table;
pub mod timestamp;

pub use bytes::ByteSequence;
pub use codec::{RawEntry, RawKey};
pub use entry::Entry;
pub use error::{Error, Result};
pub use ident::{
    ColumnFamily, ColumnIdentifier, ColumnQualifier, EntryValue, EntryVisibility, RowIdentifier,
};
pub use key::EntryKey;
pub use row::{rows, try_rows, Row, RowBuilder, Rows, TryRows};
pub use table::TableName;
pub use timestamp::Timestamp;
