//! Row assembly throughput
//!
//! Measures segmentation of a sorted entry stream into rows, the hot path
//! of every row-oriented scan consumer.

use colonnade::{
    rows, ColumnFamily, ColumnIdentifier, ColumnQualifier, Entry, EntryKey, EntryValue,
    EntryVisibility, RowIdentifier, Timestamp,
};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn fixture(row_count: usize, columns_per_row: usize) -> Vec<Entry> {
    let mut entries = Vec::with_capacity(row_count * columns_per_row);
    for row in 0..row_count {
        for column in 0..columns_per_row {
            entries.push(Entry::new(
                EntryKey::new(
                    RowIdentifier::from(format!("row-{row:08}")),
                    ColumnIdentifier::new(
                        ColumnFamily::from("attrs"),
                        ColumnQualifier::from(format!("col-{column:04}")),
                    ),
                    EntryVisibility::DEFAULT,
                    Timestamp::specified(column as i64).unwrap(),
                ),
                EntryValue::from("value"),
            ));
        }
    }
    entries
}

fn row_assembly(c: &mut Criterion) {
    let entries = fixture(500, 20);
    c.bench_function("assemble_500_rows_x20_columns", |b| {
        b.iter(|| rows(black_box(entries.clone())).count())
    });

    // Ten versions per column exercise the conflict-resolution path.
    let versioned = {
        let mut entries = Vec::with_capacity(500 * 10);
        for row in 0..500 {
            for version in 0..10i64 {
                entries.push(Entry::new(
                    EntryKey::new(
                        RowIdentifier::from(format!("row-{row:08}")),
                        ColumnIdentifier::new(
                            ColumnFamily::from("attrs"),
                            ColumnQualifier::from("col-0000"),
                        ),
                        EntryVisibility::DEFAULT,
                        Timestamp::specified(version).unwrap(),
                    ),
                    EntryValue::from("value"),
                ));
            }
        }
        entries
    };
    c.bench_function("assemble_500_rows_x10_versions", |b| {
        b.iter(|| rows(black_box(versioned.clone())).count())
    });
}

criterion_group!(benches, row_assembly);
criterion_main!(benches);
