//! Benchmark for filter parsing and evaluation
//!
//! Target: parsing a typical group filter should take a few microseconds, and
//! evaluating it well under one.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use group_filter_core::filter::{filter_records, parse, tokenize, ParseCache, ParseOptions};
use std::collections::HashMap;

const GROUP_FILTER: &str = "county = travis and ( party ~ dem or party ~ green ) \
    and 'last name' ~ 'mc' or precinct = 101 and city = \"round rock\"";

/// Create a realistic set of imported person records
fn create_test_records() -> Vec<HashMap<String, String>> {
    let counties = ["Travis", "Hays", "Williamson", "Bexar"];
    let parties = ["Democratic", "Green", "Republican", "Libertarian"];
    let cities = ["Austin", "Round Rock", "Kyle", "San Antonio"];

    (0..1000)
        .map(|i| {
            HashMap::from([
                ("county".to_string(), counties[i % 4].to_string()),
                ("party".to_string(), parties[(i / 4) % 4].to_string()),
                ("city".to_string(), cities[(i / 16) % 4].to_string()),
                ("precinct".to_string(), format!("{}", 100 + i % 7)),
                ("last name".to_string(), format!("McName{}", i)),
            ])
        })
        .collect()
}

fn benchmark_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize", |b| {
        b.iter(|| tokenize(black_box(GROUP_FILTER)))
    });
}

fn benchmark_parse(c: &mut Criterion) {
    c.bench_function("parse", |b| b.iter(|| parse(black_box(GROUP_FILTER))));
}

fn benchmark_parse_cached(c: &mut Criterion) {
    let cache = ParseCache::new(16, ParseOptions::default());

    c.bench_function("parse_cached", |b| {
        b.iter(|| cache.get_or_parse(black_box(GROUP_FILTER)))
    });
}

fn benchmark_render(c: &mut Criterion) {
    let expr = parse(GROUP_FILTER).expect("benchmark filter parses");

    c.bench_function("render", |b| b.iter(|| black_box(&expr).render()));
}

fn benchmark_evaluate(c: &mut Criterion) {
    let expr = parse(GROUP_FILTER).expect("benchmark filter parses");
    let records = create_test_records();

    c.bench_function("evaluate_1000_records", |b| {
        b.iter(|| {
            records
                .iter()
                .filter(|record| expr.evaluate(black_box(*record)))
                .count()
        })
    });
}

fn benchmark_filter_records(c: &mut Criterion) {
    let records = create_test_records();

    c.bench_function("filter_records_1000", |b| {
        b.iter(|| filter_records(black_box(GROUP_FILTER), &records))
    });
}

criterion_group!(
    benches,
    benchmark_tokenize,
    benchmark_parse,
    benchmark_parse_cached,
    benchmark_render,
    benchmark_evaluate,
    benchmark_filter_records
);
criterion_main!(benches);
