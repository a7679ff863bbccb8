// ============================================================================
// Matching Engine Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Submission - Sorted insertion into deep and shallow queues
// 2. Matching - Draining crossing books of various sizes
// 3. Snapshot - Traversal and depth aggregation
// ============================================================================

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use order_matching::numeric::{Price, Quantity};
use order_matching::prelude::*;
use std::hint::black_box;
use std::sync::Arc;

fn new_engine() -> MatchingEngine {
    MatchingEngine::new(
        Box::new(PriceTimePriority::default()),
        Arc::new(NoOpEventHandler),
    )
}

/// Resting asks at `levels` distinct prices starting at 50_000
fn engine_with_asks(levels: i64) -> MatchingEngine {
    let mut engine = new_engine();
    for i in 0..levels {
        engine
            .submit_order(
                Side::Sell,
                "BTC-USD",
                Quantity::from_lots(1),
                Price::from_ticks(50_000 + i),
            )
            .unwrap();
    }
    engine
}

// ============================================================================
// Submission Benchmarks
// Insertion cost grows with the number of orders ahead in the queue
// ============================================================================

fn benchmark_submission(c: &mut Criterion) {
    let mut group = c.benchmark_group("submit_order");

    for depth in [10i64, 100, 1000].iter() {
        // Best price: inserted at the head
        group.bench_with_input(BenchmarkId::new("head", depth), depth, |b, &depth| {
            b.iter_batched(
                || engine_with_asks(depth),
                |mut engine| {
                    black_box(engine.submit_order(
                        Side::Sell,
                        "BTC-USD",
                        Quantity::from_lots(1),
                        Price::from_ticks(49_000),
                    ))
                },
                BatchSize::SmallInput,
            );
        });

        // Worst price: full scan to the tail
        group.bench_with_input(BenchmarkId::new("tail", depth), depth, |b, &depth| {
            b.iter_batched(
                || engine_with_asks(depth),
                |mut engine| {
                    black_box(engine.submit_order(
                        Side::Sell,
                        "BTC-USD",
                        Quantity::from_lots(1),
                        Price::from_ticks(60_000),
                    ))
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

// ============================================================================
// Matching Benchmarks
// A single aggressive bid sweeping N ask levels
// ============================================================================

fn benchmark_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("match_orders_sweep");

    for levels in [10i64, 100, 1000].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(levels),
            levels,
            |b, &levels| {
                b.iter_batched(
                    || {
                        let mut engine = engine_with_asks(levels);
                        engine
                            .submit_order(
                                Side::Buy,
                                "BTC-USD",
                                Quantity::from_lots(levels),
                                Price::from_ticks(50_000 + levels),
                            )
                            .unwrap();
                        engine
                    },
                    |mut engine| black_box(engine.match_orders()),
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

// Match pass over a deep book whose heads do not cross: a single check
fn benchmark_no_cross(c: &mut Criterion) {
    let mut engine = engine_with_asks(1000);
    for i in 0..1000 {
        engine
            .submit_order(
                Side::Buy,
                "BTC-USD",
                Quantity::from_lots(1),
                Price::from_ticks(40_000 - i),
            )
            .unwrap();
    }

    c.bench_function("match_orders_no_cross", |b| {
        b.iter(|| black_box(engine.match_orders()));
    });
}

// ============================================================================
// Snapshot Benchmarks
// ============================================================================

fn benchmark_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");
    let engine = engine_with_asks(1000);

    group.bench_function("listing", |b| {
        b.iter(|| black_box(engine.snapshot(Side::Sell).count()));
    });

    for depth in [5usize, 20, 100].iter() {
        group.bench_with_input(BenchmarkId::new("depth", depth), depth, |b, &depth| {
            b.iter(|| black_box(engine.get_snapshot("BTC-USD", Some(depth))));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_submission,
    benchmark_sweep,
    benchmark_no_cross,
    benchmark_snapshot,
);
criterion_main!(benches);
