//! Scan descriptors
//!
//! A scan descriptor owns everything needed to run one scan: a connector
//! handle, the table, the range(s), column selectors, the iterator chain,
//! and settings. Executing it shapes a [`ScanRequest`], dispatches it
//! through the connector, and decodes the resulting raw stream into typed
//! entries, lazily: a scan costs nothing until its results are pulled.
//!
//! [`SimpleScan`] covers one range and yields entries in key order, which
//! is what makes its [`SimpleScan::rows`] view possible. [`BatchScan`]
//! covers several ranges at once; its results interleave in no particular
//! order, so it only exposes entries.

use crate::column::ColumnSelector;
use crate::connector::{ScanRequest, ScanSettings, StoreConnector};
use crate::error::{ScanError, ScanResult};
use crate::iterator::IteratorConfig;
use crate::range::ScanRange;
use crate::settings::{BatchSettings, SimpleSettings};
use colonnade_core::row::{try_rows, TryRows};
use colonnade_core::{Entry, TableName};
use std::sync::Arc;
use tracing::debug;

/// Typed entry stream produced by executing a scan.
///
/// Decodes the connector's raw pairs on the fly; a mid-stream connector
/// failure is wrapped with the table identity and yielded as an `Err`
/// item.
pub struct Entries {
    stream: crate::connector::EntryStream,
    table: TableName,
}

impl std::fmt::Debug for Entries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entries")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

impl Iterator for Entries {
    type Item = ScanResult<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        self.stream.next().map(|item| match item {
            Ok(raw) => Ok(Entry::from(raw)),
            Err(source) => Err(ScanError::new(self.table.clone(), source)),
        })
    }
}

/// Assigns ascending priorities to an iterator chain, in list order.
fn chain(iterators: &[IteratorConfig]) -> Vec<crate::iterator::IteratorSetting> {
    iterators
        .iter()
        .cloned()
        .enumerate()
        .map(|(priority, config)| config.into_setting(priority as u32))
        .collect()
}

// ============================================================================
// SimpleScan
// ============================================================================

/// A single-range, sorted scan over one table.
#[derive(Clone)]
pub struct SimpleScan {
    connector: Arc<dyn StoreConnector>,
    table: TableName,
    range: ScanRange,
    columns: Vec<ColumnSelector>,
    iterators: Vec<IteratorConfig>,
    settings: SimpleSettings,
}

impl SimpleScan {
    /// Constructs a scan over the given range with default settings, all
    /// columns, and no iterator chain.
    pub fn new(connector: Arc<dyn StoreConnector>, table: TableName, range: ScanRange) -> Self {
        SimpleScan {
            connector,
            table,
            range,
            columns: Vec::new(),
            iterators: Vec::new(),
            settings: SimpleSettings::default(),
        }
    }

    /// Restricts the scan to the given columns.
    pub fn with_columns(mut self, columns: impl IntoIterator<Item = ColumnSelector>) -> Self {
        self.columns = columns.into_iter().collect();
        self
    }

    /// Attaches a server-side iterator chain; priorities are assigned in
    /// list order at scan time.
    pub fn with_iterators(mut self, iterators: impl IntoIterator<Item = IteratorConfig>) -> Self {
        self.iterators = iterators.into_iter().collect();
        self
    }

    /// Replaces the scanner settings.
    pub fn with_settings(mut self, settings: SimpleSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Returns the table this scan is addressed to.
    pub fn table(&self) -> &TableName {
        &self.table
    }

    /// Returns the range bounding this scan.
    pub fn range(&self) -> &ScanRange {
        &self.range
    }

    /// Executes the scan, returning its entries in key order.
    ///
    /// # Errors
    ///
    /// Returns a [`ScanError`] if the connector refuses the request
    /// (for example, the table does not exist).
    pub fn entries(&self) -> ScanResult<Entries> {
        debug!(table = %self.table, range = ?self.range, "dispatching simple scan");
        let stream = self
            .connector
            .scan(self.request())
            .map_err(|source| ScanError::new(self.table.clone(), source))?;
        Ok(Entries {
            stream,
            table: self.table.clone(),
        })
    }

    /// Executes the scan and reassembles its entries into rows.
    ///
    /// Depends on the key-ordered output of a simple scan: one row is
    /// produced per contiguous run of equal row identifiers.
    ///
    /// # Errors
    ///
    /// Returns a [`ScanError`] if the connector refuses the request.
    pub fn rows(&self) -> ScanResult<TryRows<Entries>> {
        Ok(try_rows(self.entries()?))
    }

    fn request(&self) -> ScanRequest {
        ScanRequest {
            table: self.table.clone(),
            ranges: vec![self.range.clone()],
            columns: self.columns.clone(),
            iterators: chain(&self.iterators),
            settings: ScanSettings::Simple(self.settings.clone()),
        }
    }
}

// ============================================================================
// BatchScan
// ============================================================================

/// A multi-range scan over one table.
///
/// Ranges are deduplicated, preserving first-seen order. Results from the
/// ranges interleave in no particular order, so no row view is offered;
/// collect entries and group them client-side if rows are needed.
#[derive(Clone)]
pub struct BatchScan {
    connector: Arc<dyn StoreConnector>,
    table: TableName,
    ranges: Vec<ScanRange>,
    columns: Vec<ColumnSelector>,
    iterators: Vec<IteratorConfig>,
    settings: BatchSettings,
}

impl BatchScan {
    /// Constructs a scan over the given ranges with default settings, all
    /// columns, and no iterator chain.
    pub fn new(
        connector: Arc<dyn StoreConnector>,
        table: TableName,
        ranges: impl IntoIterator<Item = ScanRange>,
    ) -> Self {
        let mut deduped: Vec<ScanRange> = Vec::new();
        for range in ranges {
            if !deduped.contains(&range) {
                deduped.push(range);
            }
        }
        BatchScan {
            connector,
            table,
            ranges: deduped,
            columns: Vec::new(),
            iterators: Vec::new(),
            settings: BatchSettings::default(),
        }
    }

    /// Restricts the scan to the given columns.
    pub fn with_columns(mut self, columns: impl IntoIterator<Item = ColumnSelector>) -> Self {
        self.columns = columns.into_iter().collect();
        self
    }

    /// Attaches a server-side iterator chain; priorities are assigned in
    /// list order at scan time.
    pub fn with_iterators(mut self, iterators: impl IntoIterator<Item = IteratorConfig>) -> Self {
        self.iterators = iterators.into_iter().collect();
        self
    }

    /// Replaces the scanner settings.
    pub fn with_settings(mut self, settings: BatchSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Returns the table this scan is addressed to.
    pub fn table(&self) -> &TableName {
        &self.table
    }

    /// Returns the deduplicated ranges bounding this scan.
    pub fn ranges(&self) -> &[ScanRange] {
        &self.ranges
    }

    /// Executes the scan, returning its entries.
    ///
    /// # Errors
    ///
    /// Returns a [`ScanError`] if the connector refuses the request.
    pub fn entries(&self) -> ScanResult<Entries> {
        debug!(table = %self.table, ranges = self.ranges.len(), "dispatching batch scan");
        let stream = self
            .connector
            .scan(self.request())
            .map_err(|source| ScanError::new(self.table.clone(), source))?;
        Ok(Entries {
            stream,
            table: self.table.clone(),
        })
    }

    fn request(&self) -> ScanRequest {
        ScanRequest {
            table: self.table.clone(),
            ranges: self.ranges.clone(),
            columns: self.columns.clone(),
            iterators: chain(&self.iterators),
            settings: ScanSettings::Batch(self.settings.clone()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::{EntryStream, StoreError};
    use crate::iterator::iterators;
    use colonnade_core::{RawEntry, RawKey, RowIdentifier};
    use std::sync::Mutex;
    use std::time::Duration;

    fn raw(row: &str, qualifier: &str, value: &str) -> RawEntry {
        RawEntry {
            key: RawKey {
                row: row.as_bytes().to_vec(),
                family: b"f".to_vec(),
                qualifier: qualifier.as_bytes().to_vec(),
                visibility: Vec::new(),
                timestamp: 1,
            },
            value: value.as_bytes().to_vec(),
        }
    }

    /// Replays a fixed entry sequence and records the requests it serves.
    struct FixedConnector {
        entries: Vec<Result<RawEntry, StoreError>>,
        requests: Mutex<Vec<ScanRequest>>,
    }

    impl FixedConnector {
        fn new(entries: Vec<Result<RawEntry, StoreError>>) -> Arc<Self> {
            Arc::new(FixedConnector {
                entries,
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    impl StoreConnector for FixedConnector {
        fn scan(&self, request: ScanRequest) -> Result<EntryStream, StoreError> {
            self.requests.lock().unwrap().push(request);
            Ok(Box::new(self.entries.clone().into_iter()))
        }
    }

    /// A connector whose table never exists.
    struct MissingTableConnector;

    impl StoreConnector for MissingTableConnector {
        fn scan(&self, _request: ScanRequest) -> Result<EntryStream, StoreError> {
            Err(StoreError::TableNotFound)
        }
    }

    fn table() -> TableName {
        TableName::parse("prod.events").unwrap()
    }

    #[test]
    fn entries_decode_in_order() {
        let connector = FixedConnector::new(vec![Ok(raw("r1", "a", "1")), Ok(raw("r1", "b", "2"))]);
        let scan = SimpleScan::new(connector, table(), ScanRange::FullTable);

        let entries: Vec<_> = scan.entries().unwrap().collect::<ScanResult<_>>().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].key().row(), &RowIdentifier::from("r1"));
        assert_eq!(entries[0].value().as_bytes(), b"1");
    }

    #[test]
    fn rows_reassemble_from_the_stream() {
        let connector = FixedConnector::new(vec![
            Ok(raw("r1", "a", "1")),
            Ok(raw("r1", "b", "2")),
            Ok(raw("r2", "a", "3")),
        ]);
        let scan = SimpleScan::new(connector, table(), ScanRange::FullTable);

        let rows: Vec<_> = scan.rows().unwrap().collect::<ScanResult<_>>().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].identifier(), &RowIdentifier::from("r1"));
        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[1].len(), 1);
    }

    #[test]
    fn request_carries_the_whole_shape() {
        let connector = FixedConnector::new(vec![]);
        let settings = SimpleSettings::default().with_batch_size(100).unwrap();
        SimpleScan::new(
            connector.clone(),
            table(),
            ScanRange::ExactRow(RowIdentifier::from("r")),
        )
        .with_columns([ColumnSelector::entire_family("f".into())])
        .with_settings(settings.clone())
        .entries()
        .unwrap();

        let requests = connector.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.table, table());
        assert_eq!(
            request.ranges,
            vec![ScanRange::ExactRow(RowIdentifier::from("r"))]
        );
        assert_eq!(request.columns.len(), 1);
        assert_eq!(request.settings, ScanSettings::Simple(settings));
    }

    #[test]
    fn iterator_priorities_follow_list_order() {
        let connector = FixedConnector::new(vec![]);
        SimpleScan::new(connector.clone(), table(), ScanRange::FullTable)
            .with_iterators([
                iterators::age_off_filter(Duration::from_secs(60)),
                iterators::first_entry_in_row(),
            ])
            .entries()
            .unwrap();

        let requests = connector.requests.lock().unwrap();
        let iterators = &requests[0].iterators;
        assert_eq!(iterators.len(), 2);
        assert_eq!(iterators[0].priority, 0);
        assert_eq!(iterators[0].name, "AgeOffFilter");
        assert_eq!(iterators[1].priority, 1);
        assert_eq!(iterators[1].name, "FirstEntryInRowIterator");
    }

    #[test]
    fn refused_scan_is_wrapped_with_table_context() {
        let scan = SimpleScan::new(
            Arc::new(MissingTableConnector),
            table(),
            ScanRange::FullTable,
        );
        let err = scan.entries().unwrap_err();
        assert_eq!(err.table, table());
        assert_eq!(err.source, StoreError::TableNotFound);
        assert_eq!(
            err.to_string(),
            "unable to scan table 'prod.events': table not found"
        );
    }

    #[test]
    fn mid_stream_failure_is_wrapped_too() {
        let connector = FixedConnector::new(vec![
            Ok(raw("r1", "a", "1")),
            Err(StoreError::Transport("connection reset".into())),
        ]);
        let scan = SimpleScan::new(connector, table(), ScanRange::FullTable);

        let collected: Vec<_> = scan.entries().unwrap().collect();
        assert!(collected[0].is_ok());
        let err = collected[1].as_ref().unwrap_err();
        assert_eq!(err.table, table());
        assert_eq!(
            err.source,
            StoreError::Transport("connection reset".into())
        );
    }

    #[test]
    fn batch_scan_deduplicates_ranges_in_order() {
        let connector = FixedConnector::new(vec![]);
        let scan = BatchScan::new(
            connector.clone(),
            table(),
            [
                ScanRange::ExactRow(RowIdentifier::from("b")),
                ScanRange::ExactRow(RowIdentifier::from("a")),
                ScanRange::ExactRow(RowIdentifier::from("b")),
            ],
        );
        assert_eq!(
            scan.ranges(),
            &[
                ScanRange::ExactRow(RowIdentifier::from("b")),
                ScanRange::ExactRow(RowIdentifier::from("a")),
            ]
        );

        scan.entries().unwrap();
        let requests = connector.requests.lock().unwrap();
        assert_eq!(requests[0].ranges.len(), 2);
        assert!(matches!(requests[0].settings, ScanSettings::Batch(_)));
    }

    #[test]
    fn batch_scan_wraps_refusals() {
        let scan = BatchScan::new(
            Arc::new(MissingTableConnector),
            table(),
            [ScanRange::FullTable],
        );
        let err = scan.entries().unwrap_err();
        assert_eq!(err.source, StoreError::TableNotFound);
    }
}
