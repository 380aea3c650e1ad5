//! Benchmark runner that outputs a markdown table for the README.
//!
//! Run with: `cargo run --package transit-bench --bin benchmark_table --release`

use std::hint::black_box;
use std::time::{Duration, Instant};
use transit_bench::{engine, scenarios};

/// Estimates per scenario.
const ITERATIONS: u32 = 200_000;

fn main() {
    println!("transit estimate latency");
    println!("========================\n");

    let started = Instant::now();
    let engine = engine();
    println!("Engine built in {:?}\n", started.elapsed());

    println!("| Scenario | Estimate | Route | ns/request |");
    println!("|----------|----------|-------|------------|");

    for scenario in scenarios() {
        let report = engine.estimate_report(&scenario.request);

        let started = Instant::now();
        for _ in 0..ITERATIONS {
            black_box(engine.estimate(black_box(&scenario.request)));
        }
        let per_request = started.elapsed() / ITERATIONS;

        println!(
            "| {} | {} | {} | {} |",
            scenario.name,
            report.estimate,
            report.route,
            format_nanos(per_request)
        );
    }

    let stats = engine.stats().snapshot();
    println!("\n{} requests, {} model results", stats.requests, stats.model_results);
}

fn format_nanos(duration: Duration) -> String {
    format!("{:.0}", duration.as_secs_f64() * 1e9)
}
