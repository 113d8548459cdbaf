//! Simulation benchmarks for invaders_core.
//!
//! Run with: `cargo bench -p invaders_core`

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use invaders_core::engine::{Engine, EngineConfig};
use invaders_core::events::NullSink;

/// Benchmark a full seeded game against a discarding sink.
pub fn full_game_benchmark(c: &mut Criterion) {
    c.bench_function("full_game", |b| {
        b.iter(|| {
            let engine = Engine::new(EngineConfig {
                seed: black_box(42),
                ..Default::default()
            });
            black_box(engine.run(&mut NullSink))
        });
    });
}

criterion_group!(benches, full_game_benchmark);
criterion_main!(benches);
