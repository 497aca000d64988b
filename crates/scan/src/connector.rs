//! The store-connector capability
//!
//! This layer never talks to the network itself. An implementation of
//! [`StoreConnector`], a real client elsewhere or an in-memory double in
//! tests, receives one fully shaped [`ScanRequest`] and answers with a
//! lazily produced stream of raw entries, or fails with a
//! [`StoreError`]. Failures are surfaced to the caller exactly once,
//! wrapped with scan context; nothing at this level retries.

use crate::column::ColumnSelector;
use crate::iterator::IteratorSetting;
use crate::range::ScanRange;
use crate::settings::{BatchSettings, SimpleSettings};
use colonnade_core::{RawEntry, TableName};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures a store connector can report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The requested table does not exist.
    #[error("table not found")]
    TableNotFound,
    /// The connection to the store failed.
    #[error("transport failure: {0}")]
    Transport(String),
}

/// The settings half of a request, matching the scan shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanSettings {
    /// Settings for a single-range, sorted scan.
    Simple(SimpleSettings),
    /// Settings for a multi-range, unordered scan.
    Batch(BatchSettings),
}

/// A fully shaped scan, ready for a connector to execute.
///
/// Simple scans carry exactly one range; batch scans may carry several.
/// Iterator settings arrive with ascending priorities already assigned in
/// chain order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRequest {
    /// The table to scan.
    pub table: TableName,
    /// The regions of the key space to cover.
    pub ranges: Vec<ScanRange>,
    /// The columns to fetch; empty means all columns.
    pub columns: Vec<ColumnSelector>,
    /// The server-side iterator chain, in priority order.
    pub iterators: Vec<IteratorSetting>,
    /// Shape-specific scanner settings.
    pub settings: ScanSettings,
}

/// The raw entry stream a connector produces.
///
/// Entries arrive in key order for simple scans; batch scans interleave
/// their ranges in no particular order. A mid-stream failure is yielded as
/// an `Err` item.
pub type EntryStream = Box<dyn Iterator<Item = Result<RawEntry, StoreError>> + Send>;

/// Capability interface to whatever actually executes scans.
///
/// Implementations must be shareable across threads; each returned stream
/// is independently owned by its consumer.
pub trait StoreConnector: Send + Sync {
    /// Executes a bounded, ordered scan and returns its raw entries.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the table does not exist or the store
    /// is unreachable.
    fn scan(&self, request: ScanRequest) -> Result<EntryStream, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connector_is_object_safe_and_send_sync() {
        fn accepts(_: &dyn StoreConnector) {}
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        let _ = accepts as fn(&dyn StoreConnector);
        assert_send::<Box<dyn StoreConnector>>();
        assert_sync::<Box<dyn StoreConnector>>();
    }

    #[test]
    fn store_error_display() {
        assert_eq!(StoreError::TableNotFound.to_string(), "table not found");
        assert_eq!(
            StoreError::Transport("connection reset".into()).to_string(),
            "transport failure: connection reset"
        );
    }
}
