//! Criterion benchmarks for [`RouteTable::resolve`].
//!
//! Run with:
//! ```bash
//! cargo bench --package storefront-core --bench route_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use storefront_core::{RouteEntry, RouteTable, ViewId};

/// Builds a table with `n` synthetic routes followed by `/target`.
fn build_table_with_n_routes(n: usize) -> RouteTable {
    let mut entries: Vec<RouteEntry> = (0..n)
        .map(|i| RouteEntry::new(format!("/section-{i}"), ViewId::Home))
        .collect();
    entries.push(RouteEntry::new("/target", ViewId::Cart));
    RouteTable::new(entries)
}

fn bench_resolve_storefront(c: &mut Criterion) {
    let table = RouteTable::storefront();
    c.bench_function("resolve_storefront_last_entry", |b| {
        b.iter(|| table.resolve(black_box("/auth/callback")))
    });
    c.bench_function("resolve_storefront_miss", |b| {
        b.iter(|| table.resolve(black_box("/unknown")))
    });
}

fn bench_resolve_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_scaling");
    for n in [8usize, 64, 512] {
        let table = build_table_with_n_routes(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &table, |b, table| {
            b.iter(|| table.resolve(black_box("/target")))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_resolve_storefront, bench_resolve_scaling);
criterion_main!(benches);
