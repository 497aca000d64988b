//! Scan-execution errors
//!
//! A connector failure is wrapped exactly once, adding the identity of the
//! table being scanned, and propagated synchronously. This layer never
//! retries and never swallows.

use crate::connector::StoreError;
use colonnade_core::TableName;
use thiserror::Error;

/// Result type alias for scan execution.
pub type ScanResult<T> = Result<T, ScanError>;

/// A scan failed in the store-connector collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unable to scan table '{table}': {source}")]
pub struct ScanError {
    /// The table the scan was addressed to.
    pub table: TableName,
    /// The underlying connector failure.
    #[source]
    pub source: StoreError,
}

impl ScanError {
    /// Wraps a connector failure with the table it occurred on.
    pub fn new(table: TableName, source: StoreError) -> Self {
        ScanError { table, source }
    }
}
