//! Evaluation benchmarks: flat trees, nested scopes and wildcard expansion.

use std::collections::BTreeMap;
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use nebula_memberwise::prelude::*;
use serde_json::json;

// ============================================================================
// Flat trees
// ============================================================================

fn bench_flat(c: &mut Criterion) {
    let object: BTreeMap<String, i64> = (0..16).map(|i| (format!("field{i}"), i)).collect();
    let v = Validator::and_all((0..16).map(|i| member(format!("field{i}")).gte(0)));

    c.bench_function("flat_and_16_check", |b| {
        b.iter(|| black_box(v.check(black_box(&object)).unwrap()));
    });

    c.bench_function("flat_and_16_report", |b| {
        b.iter(|| {
            let mut adapter = ReportingAdapter::new(black_box(&object));
            black_box(v.apply(&mut adapter).unwrap())
        });
    });
}

// ============================================================================
// Nested JSON
// ============================================================================

fn bench_nested(c: &mut Criterion) {
    let document = json!({
        "level1": {"field1": 10, "field2": "abc"},
        "field1": 200,
    });
    let v = validator![
        member("field1").gt(100),
        member("level1").nest(validator![
            member("field1").is_in(range([10, 20, 30, 40, 50])),
            member("field2").length().lte(8),
        ]),
    ];

    c.bench_function("nested_json_check", |b| {
        b.iter(|| black_box(v.check(black_box(&document)).unwrap()));
    });
}

// ============================================================================
// Wildcards
// ============================================================================

fn bench_wildcards(c: &mut Criterion) {
    let mut group = c.benchmark_group("wildcard_all");
    for size in [8_usize, 64, 512] {
        let items: Vec<i64> = (0..).take(size).collect();
        let v = member("items").all().gte(0);
        let object: BTreeMap<String, Vec<i64>> = [("items".to_owned(), items)].into_iter().collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &object, |b, object| {
            b.iter(|| black_box(v.check(object).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_flat, bench_nested, bench_wildcards);
criterion_main!(benches);
