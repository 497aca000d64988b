//! Column selection
//!
//! A scan can restrict the columns it fetches: either everything in a
//! column family, or one exact column. Selectors are handed to the store
//! connector, which applies them server-side.

use colonnade_core::{ColumnFamily, ColumnIdentifier, ColumnQualifier, EntryKey};
use serde::{Deserialize, Serialize};

/// A column or column family to include in a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnSelector {
    /// Selects every column in a family.
    Family(ColumnFamily),
    /// Selects one exact column.
    Column(ColumnIdentifier),
}

impl ColumnSelector {
    /// Selects an entire column family.
    pub const fn entire_family(family: ColumnFamily) -> Self {
        ColumnSelector::Family(family)
    }

    /// Selects a specific column (family and qualifier).
    pub const fn specific_column(column: ColumnIdentifier) -> Self {
        ColumnSelector::Column(column)
    }

    /// Returns the selected column family.
    pub fn family(&self) -> &ColumnFamily {
        match self {
            ColumnSelector::Family(family) => family,
            ColumnSelector::Column(column) => column.family(),
        }
    }

    /// Returns the selected qualifier, or `None` for a whole-family
    /// selector.
    pub fn qualifier(&self) -> Option<&ColumnQualifier> {
        match self {
            ColumnSelector::Family(_) => None,
            ColumnSelector::Column(column) => Some(column.qualifier()),
        }
    }

    /// Determines whether the key's column is selected.
    ///
    /// Mainly useful to test doubles standing in for a real connector.
    pub fn matches(&self, key: &EntryKey) -> bool {
        match self {
            ColumnSelector::Family(family) => key.family() == family,
            ColumnSelector::Column(column) => key.column() == column,
        }
    }
}
