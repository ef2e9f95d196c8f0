//! Benchmarks for the per-sample evaluator.
//!
//! Run with: cargo bench --bench engine_benchmarks

use criterion::{Criterion, criterion_group, criterion_main};
use pointeraccel_engine::prelude::*;

const FRAME_NS: u64 = 1_000_000;

fn inputs() -> Vec<MotionDelta> {
    (0..1000)
        .map(|i| MotionDelta::new(i % 37 - 18, i % 23 - 11, i % 3 - 1))
        .collect()
}

fn engine_for(pairs: &[(&str, &str)]) -> AccelEngine<ManualClock> {
    let mut params = AccelParams::default();
    let _report = params.apply_all(pairs.iter().copied());
    AccelEngine::with_clock(params, ManualClock::new())
}

fn bench_process(c: &mut Criterion) {
    let inputs = inputs();
    let configs: [(&str, &[(&str, &str)]); 4] = [
        ("identity", &[]),
        ("linear", &[("Acceleration", "0.26"), ("SensitivityCap", "4")]),
        (
            "synchronous",
            &[
                ("AccelerationMode", "synchronous"),
                ("Acceleration", "5"),
                ("Exponent", "1"),
                ("Midpoint", "0.5"),
                ("Motivity", "1.5"),
            ],
        ),
        (
            "rotated_snapped",
            &[
                ("RotationAngle", "-0.125"),
                ("AngleSnapThreshold", "0.1"),
                ("Acceleration", "0.1"),
            ],
        ),
    ];

    let mut group = c.benchmark_group("engine_process");
    for (name, pairs) in configs {
        let mut engine = engine_for(pairs);
        let mut now = 0u64;
        group.bench_function(name, |b| {
            b.iter(|| {
                for &input in &inputs {
                    now += FRAME_NS;
                    std::hint::black_box(engine.process(now, std::hint::black_box(input)));
                }
            });
        });
    }
    group.finish();
}

fn bench_commit(c: &mut Criterion) {
    let mut engine = engine_for(&[]);
    let mut now = 0u64;
    c.bench_function("engine_commit", |b| {
        b.iter(|| {
            let mut update = PendingUpdate::new();
            let _ = update.stage("Acceleration", "0.5");
            update.trigger();
            engine.stage_update(update);
            now += 1_000_000_000;
            std::hint::black_box(engine.process(now, MotionDelta::new(3, 4, 0)));
        });
    });
}

criterion_group!(benches, bench_process, bench_commit);
criterion_main!(benches);
