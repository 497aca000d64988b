//! Colonnade - client data model and scan shaping for sorted,
//! column-oriented, multi-versioned key-value stores
//!
//! Colonnade models the store's entries as immutable value types (rows,
//! columns, visibilities, timestamps), reassembles scan output into rows,
//! and shapes scans through a closed range algebra. It does not talk to a
//! store itself: execution is delegated to whatever implements
//! [`StoreConnector`].
//!
//! # Quick Start
//!
//! ```ignore
//! use colonnade::{RowIdentifier, ScanRange, SimpleScan, TableName};
//!
//! // `connector` is an Arc<dyn StoreConnector> supplied by a store client.
//! let scan = SimpleScan::new(
//!     connector,
//!     TableName::parse("prod.events")?,
//!     ScanRange::RowPrefix(RowIdentifier::from("2026-08")),
//! );
//!
//! for row in scan.rows()? {
//!     let row = row?;
//!     println!("{}: {} columns", row.identifier(), row.len());
//! }
//! ```
//!
//! # Architecture
//!
//! The data model lives in `colonnade-core`; the range algebra, scan
//! configuration, and connector capability live in `colonnade-scan`. This
//! crate re-exports the public API of both.

// Re-export the data model from colonnade-core
pub use colonnade_core::{
    rows, try_rows, ByteSequence, ColumnFamily, ColumnIdentifier, ColumnQualifier, Entry, EntryKey,
    EntryValue, EntryVisibility, Error, RawEntry, RawKey, Result, Row, RowBuilder, RowIdentifier,
    Rows, TableName, Timestamp, TryRows,
};

// Re-export scan shaping from colonnade-scan
pub use colonnade_scan::{
    iterators, Authorizations, BatchScan, BatchSettings, ColumnSelector, Entries, EntryStream,
    IteratorConfig, IteratorSetting, KeyBound, KeyExtent, KeyPrefix, ScanError, ScanOptions,
    ScanRange, ScanRequest, ScanResult, ScanSettings, SettingsError, SimpleScan, SimpleSettings,
    StoreConnector, StoreError,
};
