//! Per-request estimate benchmarks.
//!
//! Run with: `cargo bench --package transit-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use transit_bench::{engine, scenarios};

fn estimate_benchmark(c: &mut Criterion) {
    let engine = engine();
    let mut group = c.benchmark_group("estimate");
    group.throughput(Throughput::Elements(1));

    for scenario in scenarios() {
        group.bench_with_input(
            BenchmarkId::new("route", scenario.name),
            &scenario.request,
            |b, request| b.iter(|| engine.estimate(black_box(request))),
        );
    }

    group.finish();
}

fn batch_benchmark(c: &mut Criterion) {
    let engine = engine();
    let requests: Vec<_> = scenarios()
        .into_iter()
        .map(|scenario| scenario.request)
        .cycle()
        .take(1024)
        .collect();

    let mut group = c.benchmark_group("batch");
    group.throughput(Throughput::Elements(requests.len() as u64));
    group.bench_function("mixed-1024", |b| {
        b.iter(|| {
            requests
                .iter()
                .map(|request| engine.estimate(black_box(request)).max_days)
                .sum::<i64>()
        });
    });
    group.finish();
}

criterion_group!(benches, estimate_benchmark, batch_benchmark);
criterion_main!(benches);
