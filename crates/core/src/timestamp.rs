//! Entry version markers
//!
//! A timestamp is either a specified `i64` (milliseconds since the Unix
//! epoch, or an opaque logical counter) or unspecified. Timestamps are
//! typically left unspecified when writing, in which case the store assigns
//! its current time; they are always specified when reading back.
//!
//! On the wire the store encodes "unspecified" as `i64::MAX`, so that raw
//! value is reserved: it can never be constructed as a specified timestamp,
//! and an unspecified timestamp sorts strictly greater than every specified
//! one.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// A totally ordered entry version marker.
///
/// Internally stores the raw wire value, with [`Timestamp::RESERVED`]
/// encoding "unspecified". Keeping the representation private makes the
/// reserved-value invariant impossible to violate: the only way to obtain
/// the sentinel is through [`Timestamp::UNSPECIFIED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub struct Timestamp(i64);

impl Timestamp {
    /// The raw wire value reserved for unspecified timestamps.
    pub const RESERVED: i64 = i64::MAX;

    /// A timestamp that has not been specified.
    ///
    /// For mutations this means "apply the store's current time". Sorts
    /// greater than every specified timestamp.
    pub const UNSPECIFIED: Timestamp = Timestamp(Self::RESERVED);

    /// Constructs a specified timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReservedTimestamp`] if `value` is the reserved
    /// sentinel (`i64::MAX`).
    pub fn specified(value: i64) -> Result<Self> {
        if value == Self::RESERVED {
            Err(Error::ReservedTimestamp)
        } else {
            Ok(Timestamp(value))
        }
    }

    /// Constructs a timestamp from its raw wire value.
    ///
    /// Total: the reserved sentinel decodes to [`Timestamp::UNSPECIFIED`].
    pub const fn from_raw(raw: i64) -> Self {
        Timestamp(raw)
    }

    /// Returns the raw wire value ([`Timestamp::RESERVED`] if unspecified).
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Returns `true` if this timestamp has been specified.
    pub const fn is_specified(self) -> bool {
        self.0 != Self::RESERVED
    }

    /// Returns the specified value, or `None` if unspecified.
    pub const fn value(self) -> Option<i64> {
        if self.is_specified() {
            Some(self.0)
        } else {
            None
        }
    }

    /// Constructs a timestamp for the current moment, truncated to the
    /// nearest millisecond.
    ///
    /// Falls back to the epoch if the system clock reads before 1970.
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64;
        Timestamp(millis)
    }

    /// Converts a specified timestamp to a [`SystemTime`], assuming it
    /// holds milliseconds since the epoch rather than a logical counter.
    ///
    /// Returns `None` if the timestamp is unspecified.
    pub fn to_system_time(self) -> Option<SystemTime> {
        let millis = self.value()?;
        if millis >= 0 {
            Some(UNIX_EPOCH + Duration::from_millis(millis as u64))
        } else {
            Some(UNIX_EPOCH - Duration::from_millis(millis.unsigned_abs()))
        }
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Timestamp::UNSPECIFIED
    }
}

impl From<i64> for Timestamp {
    /// Decodes a raw wire value; the sentinel becomes `UNSPECIFIED`.
    fn from(raw: i64) -> Self {
        Timestamp::from_raw(raw)
    }
}

impl From<Timestamp> for i64 {
    /// Extracts the raw wire value.
    fn from(timestamp: Timestamp) -> Self {
        timestamp.raw()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_specified() {
            write!(f, "{}", self.0)
        } else {
            write!(f, "UNSPECIFIED")
        }
    }
}
