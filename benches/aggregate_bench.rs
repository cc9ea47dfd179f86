//! Criterion benchmarks for gap-filling aggregation and range fetches

use chrono::{Days, NaiveDate};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use eggtrack::services::{Aggregator, RangePolicy, RecordStore, SqliteStore};
use eggtrack::types::Record;
use std::hint::black_box;

/// Ten years of history with a record on every other day
fn sparse_history() -> Vec<Record> {
    let start = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
    (0..3650u64)
        .step_by(2)
        .map(|i| Record::new(start + Days::new(i), (i % 7) as u32, None))
        .collect()
}

fn anchor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 6, 15).unwrap()
}

fn bench_aggregate(c: &mut Criterion) {
    let history = sparse_history();

    let mut group = c.benchmark_group("aggregate");
    group.throughput(Throughput::Elements(history.len() as u64));

    for policy in RangePolicy::all() {
        let range = policy.derive(anchor());
        group.bench_with_input(
            BenchmarkId::new("full_history", policy.label()),
            &range,
            |b, range| {
                b.iter(|| Aggregator::aggregate(black_box(&history), *range));
            },
        );
    }

    group.finish();
}

fn bench_summarize(c: &mut Criterion) {
    let history = sparse_history();
    let series = Aggregator::aggregate(&history, RangePolicy::Year.derive(anchor()));

    c.bench_function("summarize_year", |b| {
        b.iter(|| Aggregator::summarize(black_box(&series)));
    });
}

fn bench_store_year(c: &mut Criterion) {
    let mut store = SqliteStore::open_in_memory().unwrap();
    for record in sparse_history() {
        store.upsert(&record).unwrap();
    }
    let range = RangePolicy::Year.derive(anchor());

    let mut group = c.benchmark_group("store");
    group.sample_size(20);

    group.bench_function("fetch_and_aggregate_year", |b| {
        b.iter(|| {
            let records = store.fetch_in_range(black_box(range)).unwrap();
            Aggregator::aggregate(&records, range)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_aggregate, bench_summarize, bench_store_year);
criterion_main!(benches);
