//! Server-side iterator configuration
//!
//! The store can chain transforms ("iterators") into a scan server-side.
//! This layer does not interpret their semantics: a configuration is an
//! opaque name, an implementation identifier the server resolves, and a
//! string-keyed option map. Priorities are not chosen by the caller;
//! scan descriptors assign them in list order at scan time, which is the
//! main reason this type exists.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Configuration for one server-side iterator, without a priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IteratorConfig {
    name: String,
    implementation: String,
    options: BTreeMap<String, String>,
}

impl IteratorConfig {
    /// Constructs an iterator configuration with no options.
    pub fn new(name: impl Into<String>, implementation: impl Into<String>) -> Self {
        IteratorConfig {
            name: name.into(),
            implementation: implementation.into(),
            options: BTreeMap::new(),
        }
    }

    /// Adds a configuration option, replacing any previous value for the
    /// same key.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Returns the iterator's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the implementation identifier the server resolves.
    pub fn implementation(&self) -> &str {
        &self.implementation
    }

    /// Returns the options passed to the iterator.
    pub fn options(&self) -> &BTreeMap<String, String> {
        &self.options
    }

    /// Attaches a priority, producing the form sent to the connector.
    /// Iterators with lower priority numbers are applied first.
    pub fn into_setting(self, priority: u32) -> IteratorSetting {
        IteratorSetting {
            priority,
            name: self.name,
            implementation: self.implementation,
            options: self.options,
        }
    }
}

/// An iterator configuration with its scan-time priority attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IteratorSetting {
    /// Position in the chain; lower numbers apply first.
    pub priority: u32,
    /// The iterator's name.
    pub name: String,
    /// The implementation identifier the server resolves.
    pub implementation: String,
    /// Options passed to the iterator.
    pub options: BTreeMap<String, String>,
}

/// Convenience constructors for the store's built-in iterators.
pub mod iterators {
    use super::*;

    const AGE_OFF_FILTER: &str = "system.AgeOffFilter";
    const FIRST_ENTRY_IN_ROW: &str = "system.FirstEntryInRowIterator";

    fn millis(duration: Duration) -> String {
        duration.as_millis().to_string()
    }

    /// Configures an age-off filter that drops entries older than the
    /// given threshold.
    pub fn age_off_filter(threshold: Duration) -> IteratorConfig {
        IteratorConfig::new("AgeOffFilter", AGE_OFF_FILTER).option("ttl", millis(threshold))
    }

    /// Configures an age-off filter with an explicit notion of "now",
    /// instead of the server's clock.
    pub fn age_off_filter_at(threshold: Duration, current_time: SystemTime) -> IteratorConfig {
        let now = current_time
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis()
            .to_string();
        age_off_filter(threshold).option("currentTime", now)
    }

    /// Configures an iterator that returns only the first entry of each
    /// row.
    pub fn first_entry_in_row() -> IteratorConfig {
        IteratorConfig::new("FirstEntryInRowIterator", FIRST_ENTRY_IN_ROW)
    }

    /// Same as [`first_entry_in_row`], tuning how many entries are scanned
    /// before seeking to the next row.
    pub fn first_entry_in_row_with_seek(scans_before_seek: u32) -> IteratorConfig {
        first_entry_in_row().option("scansBeforeSeek", scans_before_seek.to_string())
    }
}
