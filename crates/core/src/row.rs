//! Row reconstruction
//!
//! A range scan yields entries in key order: every version and visibility
//! of every column, row by row. [`RowBuilder`] collapses one row's worth of
//! entries into a [`Row`] holding a single current value per column, and
//! [`rows`]/[`try_rows`] segment a whole entry stream into rows, one per
//! contiguous run of equal row identifiers.
//!
//! ## Conflict resolution
//!
//! The store may hold several entries for the same column. When a builder
//! sees a duplicate column it keeps exactly one winner:
//! 1. the strictly newer timestamp wins (unspecified counts as newest);
//! 2. on a tied timestamp, the lexicographically lesser visibility wins;
//! 3. on a tie in both, the entry accepted first wins and the later
//!    duplicate is silently dropped.
//!
//! This trades multi-visibility reads for the single-value-per-column model
//! most tables are used as.

use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::ident::{ColumnIdentifier, EntryValue, RowIdentifier};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry as Slot;
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Row
// ============================================================================

/// A group of (usually all) the entries in one row, one entry per column.
///
/// Immutable once built. Every contained entry carries the row's
/// identifier; at most one entry exists per distinct column, even though
/// the store may hold several versions or visibilities for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    identifier: RowIdentifier,
    entries: BTreeMap<ColumnIdentifier, Entry>,
}

// No is_empty: a built row always holds at least one entry.
#[allow(clippy::len_without_is_empty)]
impl Row {
    /// Constructs a row from a collection of entries for the same row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RowMismatch`] if the entries disagree on the row
    /// identifier, or [`Error::EmptyRow`] if the collection is empty.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = Entry>,
    {
        let mut builder = RowBuilder::new();
        for entry in entries {
            builder.accept(entry)?;
        }
        builder.build()
    }

    /// Returns the row's identifier.
    pub fn identifier(&self) -> &RowIdentifier {
        &self.identifier
    }

    /// Returns the entries in the row, keyed and ordered by column.
    pub fn entries(&self) -> &BTreeMap<ColumnIdentifier, Entry> {
        &self.entries
    }

    /// Returns the entry at the given column, if present.
    pub fn get(&self, column: &ColumnIdentifier) -> Option<&Entry> {
        self.entries.get(column)
    }

    /// Returns the value at the given column, if present.
    pub fn value(&self, column: &ColumnIdentifier) -> Option<&EntryValue> {
        self.entries.get(column).map(Entry::value)
    }

    /// Returns the number of columns in the row. Always at least one.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Creates a builder pre-populated with this row's entries.
    ///
    /// Useful for deriving a modified row; the usual duplicate-column
    /// resolution applies to anything accepted afterwards.
    pub fn to_builder(&self) -> RowBuilder {
        RowBuilder {
            state: State::Accumulating {
                identifier: self.identifier.clone(),
                columns: self.entries.clone(),
            },
        }
    }

    /// Consumes the row, returning its entries in column order.
    pub fn into_entries(self) -> impl Iterator<Item = Entry> {
        self.entries.into_values()
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row{{{} ({} columns)}}", self.identifier, self.len())
    }
}

// ============================================================================
// RowBuilder
// ============================================================================

/// Builder state: either nothing consumed yet, or an identifier fixed by
/// the first entry plus the winning entry per column seen so far.
#[derive(Debug, Clone, Default)]
enum State {
    #[default]
    Empty,
    Accumulating {
        identifier: RowIdentifier,
        columns: BTreeMap<ColumnIdentifier, Entry>,
    },
}

/// Accumulates entries for a single row and freezes them into a [`Row`].
///
/// The builder is a two-state machine. It starts empty; the first accepted
/// entry fixes the row identifier; subsequent entries must carry the same
/// identifier. [`RowBuilder::build`] freezes the accumulated columns into an
/// immutable [`Row`] and resets the builder for reuse.
///
/// Not thread-safe: confine each builder to a single consumer.
#[derive(Debug, Clone, Default)]
pub struct RowBuilder {
    state: State,
}

/// Whether `candidate` displaces `existing` at the same column.
///
/// Later timestamp wins; on a tie, the lesser-sorting visibility wins; on a
/// tie in both, the existing entry is kept.
fn replaces(existing: &Entry, candidate: &Entry) -> bool {
    use std::cmp::Ordering;
    match existing.key().timestamp().cmp(&candidate.key().timestamp()) {
        Ordering::Less => true,
        Ordering::Greater => false,
        Ordering::Equal => existing.key().visibility() > candidate.key().visibility(),
    }
}

impl RowBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        RowBuilder::default()
    }

    /// Consumes an entry.
    ///
    /// In the empty state this fixes the builder's row identifier. If the
    /// entry's column is already occupied, the winner is chosen by the
    /// module-level conflict-resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RowMismatch`], without mutating the builder, if
    /// the entry's row differs from the fixed identifier. Callers are
    /// expected to have partitioned input by row already; see
    /// [`RowBuilder::can_accept`].
    pub fn accept(&mut self, entry: Entry) -> Result<()> {
        if let State::Accumulating { identifier, .. } = &self.state {
            if identifier != entry.key().row() {
                return Err(Error::RowMismatch {
                    expected: identifier.clone(),
                    actual: entry.key().row().clone(),
                });
            }
        }
        self.push(entry);
        Ok(())
    }

    /// Builds a [`Row`] and resets the builder to its pristine state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyRow`] if no entries have been consumed.
    pub fn build(&mut self) -> Result<Row> {
        self.take().ok_or(Error::EmptyRow)
    }

    /// Resets the builder to its pristine state, discarding any
    /// accumulated entries.
    pub fn reset(&mut self) {
        self.state = State::Empty;
    }

    /// Indicates whether the builder can currently accept the entry:
    /// always in the empty state, otherwise only when the entry carries
    /// the fixed row identifier.
    pub fn can_accept(&self, entry: &Entry) -> bool {
        match &self.state {
            State::Empty => true,
            State::Accumulating { identifier, .. } => identifier == entry.key().row(),
        }
    }

    /// Indicates whether the builder has consumed any entries.
    pub fn is_empty(&self) -> bool {
        matches!(self.state, State::Empty)
    }

    /// Returns the fixed row identifier, if any entry has been consumed.
    pub fn identifier(&self) -> Option<&RowIdentifier> {
        match &self.state {
            State::Empty => None,
            State::Accumulating { identifier, .. } => Some(identifier),
        }
    }

    /// Inserts an entry whose row has already been checked.
    fn push(&mut self, entry: Entry) {
        match &mut self.state {
            State::Empty => {
                let identifier = entry.key().row().clone();
                let mut columns = BTreeMap::new();
                columns.insert(entry.key().column().clone(), entry);
                self.state = State::Accumulating { identifier, columns };
            }
            State::Accumulating { columns, .. } => match columns.entry(entry.key().column().clone())
            {
                Slot::Vacant(slot) => {
                    slot.insert(entry);
                }
                Slot::Occupied(mut slot) => {
                    if replaces(slot.get(), &entry) {
                        slot.insert(entry);
                    }
                }
            },
        }
    }

    /// Freezes the accumulated state into a row, leaving the builder
    /// empty. `None` if nothing has been consumed.
    fn take(&mut self) -> Option<Row> {
        match std::mem::take(&mut self.state) {
            State::Empty => None,
            State::Accumulating {
                identifier,
                columns,
            } => Some(Row {
                identifier,
                entries: columns,
            }),
        }
    }
}

// ============================================================================
// Row-stream segmentation
// ============================================================================

/// Adapts an entry iterator into a lazy iterator of rows.
///
/// Emits one [`Row`] per contiguous run of equal row identifiers, which is
/// how entries arrive from a range scan. If entries for the same row are
/// *not* adjacent in the input, multiple rows are produced for that
/// identifier rather than one; the input-order precondition is the
/// caller's responsibility.
pub fn rows<I>(entries: I) -> Rows<I::IntoIter>
where
    I: IntoIterator<Item = Entry>,
{
    Rows {
        entries: entries.into_iter(),
        builder: RowBuilder::new(),
    }
}

/// Iterator returned by [`rows`].
#[derive(Debug)]
pub struct Rows<I> {
    entries: I,
    builder: RowBuilder,
}

impl<I> Iterator for Rows<I>
where
    I: Iterator<Item = Entry>,
{
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        for entry in self.entries.by_ref() {
            if self.builder.can_accept(&entry) {
                self.builder.push(entry);
            } else {
                let finished = self.builder.take();
                self.builder.push(entry);
                if finished.is_some() {
                    return finished;
                }
            }
        }
        self.builder.take()
    }
}

/// Fallible-stream variant of [`rows`].
///
/// Adapts an iterator of `Result<Entry, E>`, the shape produced by a scan
/// whose source can fail mid-stream, into an iterator of
/// `Result<Row, E>`. The first error discards the partially accumulated
/// row, is yielded once, and fuses the iterator.
pub fn try_rows<I, E>(entries: I) -> TryRows<I::IntoIter>
where
    I: IntoIterator<Item = std::result::Result<Entry, E>>,
{
    TryRows {
        entries: entries.into_iter(),
        builder: RowBuilder::new(),
        failed: false,
    }
}

/// Iterator returned by [`try_rows`].
#[derive(Debug)]
pub struct TryRows<I> {
    entries: I,
    builder: RowBuilder,
    failed: bool,
}

impl<I, E> Iterator for TryRows<I>
where
    I: Iterator<Item = std::result::Result<Entry, E>>,
{
    type Item = std::result::Result<Row, E>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            match self.entries.next() {
                Some(Ok(entry)) => {
                    if self.builder.can_accept(&entry) {
                        self.builder.push(entry);
                    } else {
                        let finished = self.builder.take();
                        self.builder.push(entry);
                        if let Some(row) = finished {
                            return Some(Ok(row));
                        }
                    }
                }
                Some(Err(error)) => {
                    self.failed = true;
                    self.builder.reset();
                    return Some(Err(error));
                }
                None => return self.builder.take().map(Ok),
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
