/// Change detection benchmarks
///
/// Measures the single-pass scan plus t-test over window sizes typical for
/// metric monitoring, and the cost of the deferred variance computation on a
/// window where the scatter maximum keeps moving.
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use shiftpoint::change::{
    detect_change, detect_change_with, scan, Confidence, DetectorConfig, VarianceEstimator,
};
use std::time::Duration;

/// Deterministic noisy step: level shift at the midpoint
fn noisy_step(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| {
            let noise = ((i * 7919) % 13) as f64 / 13.0 - 0.5;
            let level = if i < len / 2 { 100.0 } else { 104.0 };
            level + noise
        })
        .collect()
}

/// Ramp: every candidate is a new scatter maximum until the midpoint
fn ramp(len: usize) -> Vec<f64> {
    (0..len).map(|i| i as f64).collect()
}

fn bench_detect_change(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect_change");
    group.measurement_time(Duration::from_secs(5));

    for len in [64, 256, 1024, 4096] {
        let window = noisy_step(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &window, |b, window| {
            b.iter(|| detect_change(black_box(window), 5, Confidence::Conf95));
        });
    }

    group.finish();
}

fn bench_variance_estimators(c: &mut Criterion) {
    let mut group = c.benchmark_group("variance_estimator");
    let window = noisy_step(1024);

    for (name, estimator) in [
        ("compatible", VarianceEstimator::Compatible),
        ("unbiased", VarianceEstimator::Unbiased),
    ] {
        let config = DetectorConfig {
            variance_estimator: estimator,
            ..DetectorConfig::default()
        };
        group.bench_function(name, |b| {
            b.iter(|| detect_change_with(black_box(&window), &config));
        });
    }

    group.finish();
}

fn bench_scan_moving_maximum(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_moving_maximum");
    let window = ramp(1024);

    group.bench_function("ramp_1024", |b| {
        b.iter(|| scan(black_box(&window), 5, VarianceEstimator::Compatible));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_detect_change,
    bench_variance_estimators,
    bench_scan_moving_maximum
);
criterion_main!(benches);
