//! Validated table names
//!
//! A table lives in an optional namespace; the qualified form is written
//! `namespace.name`. Neither part may contain dots or whitespace, and the
//! name itself must be non-empty. An empty namespace selects the store's
//! default namespace.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A table name with optional namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TableName {
    namespace: String,
    name: String,
}

fn valid_part(part: &str) -> bool {
    part.chars().all(|c| c != '.' && !c.is_whitespace())
}

impl TableName {
    /// Constructs a table name from a namespace and a name.
    ///
    /// The namespace may be empty, selecting the default namespace.
    ///
    /// # Errors
    ///
    /// Returns an error if either part contains a dot or whitespace, or if
    /// the name is empty.
    pub fn new(namespace: &str, name: &str) -> Result<Self> {
        if !valid_part(namespace) {
            return Err(Error::InvalidTableName(namespace.to_owned()));
        }
        if !valid_part(name) {
            return Err(Error::InvalidTableName(name.to_owned()));
        }
        if name.is_empty() {
            return Err(Error::EmptyTableName);
        }
        Ok(TableName {
            namespace: namespace.to_owned(),
            name: name.to_owned(),
        })
    }

    /// Parses a possibly namespace-qualified table name.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not of the form `name` or
    /// `namespace.name` with both parts valid and non-empty.
    pub fn parse(qualified: &str) -> Result<Self> {
        match qualified.split_once('.') {
            Some((namespace, name)) if namespace.is_empty() => {
                Err(Error::InvalidTableName(format!(".{name}")))
            }
            Some((namespace, name)) => Self::new(namespace, name),
            None => Self::new("", qualified),
        }
    }

    /// Returns the (possibly empty) namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the name within the namespace.
    pub fn name(&self) -> &str {
        &self.name
    }
}

// Orders by namespace, then name.
impl Ord for TableName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.namespace
            .cmp(&other.namespace)
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for TableName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.namespace, self.name)
        }
    }
}

impl FromStr for TableName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        TableName::parse(s)
    }
}

impl TryFrom<String> for TableName {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        TableName::parse(&s)
    }
}

impl From<TableName> for String {
    fn from(table: TableName) -> Self {
        table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_name_parses_into_default_namespace() {
        let table = TableName::parse("events").unwrap();
        assert_eq!(table.namespace(), "");
        assert_eq!(table.name(), "events");
        assert_eq!(table.to_string(), "events");
    }

    #[test]
    fn qualified_name_parses() {
        let table = TableName::parse("prod.events").unwrap();
        assert_eq!(table.namespace(), "prod");
        assert_eq!(table.name(), "events");
        assert_eq!(table.to_string(), "prod.events");
    }

    #[test]
    fn invalid_names_are_rejected() {
        assert!(TableName::parse("").is_err());
        assert!(TableName::parse("a.b.c").is_err());
        assert!(TableName::parse(".events").is_err());
        assert!(TableName::parse("has space").is_err());
        assert!(TableName::new("ns", "with.dot").is_err());
        assert!(TableName::new("with space", "ok").is_err());
        assert_eq!(TableName::new("ns", ""), Err(Error::EmptyTableName));
    }

    #[test]
    fn empty_namespace_is_the_default() {
        let table = TableName::new("", "events").unwrap();
        assert_eq!(table, TableName::parse("events").unwrap());
    }

    #[test]
    fn ordering_is_namespace_then_name() {
        let a = TableName::parse("a.z").unwrap();
        let b = TableName::parse("b.a").unwrap();
        assert!(a < b);

        let bare = TableName::parse("z").unwrap();
        assert!(bare < a); // empty namespace sorts first
    }

    #[test]
    fn from_str_round_trips() {
        let table: TableName = "prod.events".parse().unwrap();
        assert_eq!(table, TableName::new("prod", "events").unwrap());
    }

    #[test]
    fn serde_revalidates() {
        let table = TableName::parse("prod.events").unwrap();
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, "\"prod.events\"");
        let restored: TableName = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, table);

        let bad: std::result::Result<TableName, _> = serde_json::from_str("\"a.b.c\"");
        assert!(bad.is_err());
    }
}
