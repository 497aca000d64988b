//! Scanner settings
//!
//! Tuning knobs forwarded verbatim to the store connector. The shared
//! [`ScanOptions`] apply to every scan shape; [`SimpleSettings`] and
//! [`BatchSettings`] add the knobs specific to single-range and
//! multi-range scans respectively. All are plain immutable values with
//! chainable `with_*` builders; the timeout builders validate that a
//! duration is actually positive.

use colonnade_core::ByteSequence;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while building scanner settings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// A timeout of zero was supplied.
    #[error("timeout must be positive")]
    ZeroTimeout,
    /// A batch timeout of zero was supplied.
    #[error("batch timeout must be positive")]
    ZeroBatchTimeout,
    /// A batch size of zero was supplied.
    #[error("batch size must be positive")]
    ZeroBatchSize,
    /// A query thread count of zero was supplied.
    #[error("query thread count must be positive")]
    ZeroQueryThreads,
}

/// The set of authorization tokens a scan presents to the store.
///
/// Entries whose visibility expressions are not satisfied by these tokens
/// are filtered out server-side. Empty by default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorizations(BTreeSet<ByteSequence>);

impl Authorizations {
    /// The empty authorization set.
    pub const fn none() -> Self {
        Authorizations(BTreeSet::new())
    }

    /// Returns `true` if the token is present.
    pub fn contains(&self, token: &ByteSequence) -> bool {
        self.0.contains(token)
    }

    /// Returns the number of tokens.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no tokens are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the tokens in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &ByteSequence> {
        self.0.iter()
    }
}

impl<T: Into<ByteSequence>> FromIterator<T> for Authorizations {
    fn from_iter<I: IntoIterator<Item = T>>(tokens: I) -> Self {
        Authorizations(tokens.into_iter().map(Into::into).collect())
    }
}

/// Settings shared by every scan shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOptions {
    timeout: Option<Duration>,
    batch_timeout: Option<Duration>,
    authorizations: Authorizations,
}

impl ScanOptions {
    /// Sets the overall scan timeout.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ZeroTimeout`] if the duration is zero.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, SettingsError> {
        if timeout.is_zero() {
            return Err(SettingsError::ZeroTimeout);
        }
        self.timeout = Some(timeout);
        Ok(self)
    }

    /// Sets the per-batch timeout.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ZeroBatchTimeout`] if the duration is zero.
    pub fn with_batch_timeout(mut self, batch_timeout: Duration) -> Result<Self, SettingsError> {
        if batch_timeout.is_zero() {
            return Err(SettingsError::ZeroBatchTimeout);
        }
        self.batch_timeout = Some(batch_timeout);
        Ok(self)
    }

    /// Sets the authorization tokens the scan presents.
    pub fn with_authorizations(mut self, authorizations: Authorizations) -> Self {
        self.authorizations = authorizations;
        self
    }

    /// Returns the overall scan timeout, if set.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the per-batch timeout, if set.
    pub fn batch_timeout(&self) -> Option<Duration> {
        self.batch_timeout
    }

    /// Returns the authorization tokens.
    pub fn authorizations(&self) -> &Authorizations {
        &self.authorizations
    }
}

/// Settings for a single-range, sorted scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleSettings {
    options: ScanOptions,
    batch_size: Option<u32>,
    read_ahead_threshold: Option<u64>,
    isolation_enabled: bool,
}

impl SimpleSettings {
    /// Replaces the shared options.
    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets how many entries the connector fetches per batch.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ZeroBatchSize`] if the size is zero.
    pub fn with_batch_size(mut self, batch_size: u32) -> Result<Self, SettingsError> {
        if batch_size == 0 {
            return Err(SettingsError::ZeroBatchSize);
        }
        self.batch_size = Some(batch_size);
        Ok(self)
    }

    /// Sets how many batches are read before read-ahead kicks in.
    pub fn with_read_ahead_threshold(mut self, threshold: u64) -> Self {
        self.read_ahead_threshold = Some(threshold);
        self
    }

    /// Enables or disables row isolation.
    pub fn with_isolation(mut self, enabled: bool) -> Self {
        self.isolation_enabled = enabled;
        self
    }

    /// Returns the shared options.
    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Returns the batch size, if set.
    pub fn batch_size(&self) -> Option<u32> {
        self.batch_size
    }

    /// Returns the read-ahead threshold, if set.
    pub fn read_ahead_threshold(&self) -> Option<u64> {
        self.read_ahead_threshold
    }

    /// Returns whether row isolation is enabled.
    pub fn isolation_enabled(&self) -> bool {
        self.isolation_enabled
    }
}

/// Settings for a multi-range, unordered scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSettings {
    options: ScanOptions,
    query_threads: u32,
}

impl BatchSettings {
    /// The default number of server-side query threads.
    pub const DEFAULT_QUERY_THREADS: u32 = 2;

    /// Replaces the shared options.
    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the number of server-side query threads.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ZeroQueryThreads`] if the count is zero.
    pub fn with_query_threads(mut self, query_threads: u32) -> Result<Self, SettingsError> {
        if query_threads == 0 {
            return Err(SettingsError::ZeroQueryThreads);
        }
        self.query_threads = query_threads;
        Ok(self)
    }

    /// Returns the shared options.
    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Returns the number of server-side query threads.
    pub fn query_threads(&self) -> u32 {
        self.query_threads
    }
}

impl Default for BatchSettings {
    fn default() -> Self {
        BatchSettings {
            options: ScanOptions::default(),
            query_threads: Self::DEFAULT_QUERY_THREADS,
        }
    }
}
