//! Error types for the data model
//!
//! All of these are fail-fast construction or precondition errors: they are
//! surfaced synchronously to the caller, never swallowed, and never retried.

use crate::ident::RowIdentifier;
use thiserror::Error;

/// Result type alias for data-model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the data model.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// `i64::MAX` is reserved on the wire for unspecified timestamps and
    /// cannot be used as a specified value.
    #[error("i64::MAX is reserved for unspecified timestamps")]
    ReservedTimestamp,

    /// A table name or namespace contained a dot or whitespace.
    #[error("'{0}' is not a valid table name part")]
    InvalidTableName(String),

    /// A table name was empty.
    #[error("empty table names are not valid")]
    EmptyTableName,

    /// An entry for a different row was fed to a row builder.
    ///
    /// Always a caller bug: input must be partitioned by row before it
    /// reaches the builder. The builder's state is unchanged.
    #[error("mismatched row ({expected} != {actual})")]
    RowMismatch {
        /// The row the builder is accumulating.
        expected: RowIdentifier,
        /// The row of the rejected entry.
        actual: RowIdentifier,
    },

    /// `build` was called on a builder that has consumed no entries.
    #[error("row contains no entries")]
    EmptyRow,
}
