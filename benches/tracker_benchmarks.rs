//! Benchmarks for the per-frame hot path

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use posture_tracker::{
    angles::AngleCalculator,
    filters::{create_filter, NoFilter},
    landmarks::{Landmark, PoseLandmarks},
    monitor::PostureMonitor,
    sink::RecordingSink,
    tracker::{MajorityPolicy, PostureStateTracker, TrackerConfig},
};

fn landmarks(t: f64) -> PoseLandmarks {
    let sway = 0.03 * t.sin();
    PoseLandmarks::new(
        Landmark::new(0.45 + sway, 0.20),
        Landmark::new(0.55 + sway, 0.20),
        Landmark::new(0.40, 0.40),
        Landmark::new(0.60, 0.40),
        Landmark::new(0.45, 0.80),
        Landmark::new(0.55, 0.80),
    )
}

fn benchmark_angles(c: &mut Criterion) {
    let calculator = AngleCalculator::new();
    let frame = landmarks(0.7);

    c.bench_function("angle_compute", |b| {
        b.iter(|| black_box(calculator.compute(black_box(&frame))));
    });
}

fn benchmark_tracker(c: &mut Criterion) {
    let mut group = c.benchmark_group("tracker");

    // Simulated readings drifting above and below the limits
    let readings: Vec<(f64, f64)> = (0..1000)
        .map(|i| {
            let t = f64::from(i) * 0.05;
            (30.0 + 25.0 * t.sin(), 8.0 + 6.0 * t.cos())
        })
        .collect();

    for (name, majority) in [
        ("cumulative", MajorityPolicy::Cumulative),
        ("window_90", MajorityPolicy::Window(90)),
    ] {
        let mut tracker = PostureStateTracker::new(TrackerConfig {
            majority,
            ..TrackerConfig::default()
        })
        .unwrap();

        group.bench_with_input(BenchmarkId::new("sequence_1000", name), &readings, |b, data| {
            b.iter(|| {
                tracker.reset();
                for &(neck, torso) in data {
                    black_box(tracker.update(black_box(neck), black_box(torso)));
                }
            });
        });
    }

    group.finish();
}

fn benchmark_monitor(c: &mut Criterion) {
    let mut group = c.benchmark_group("monitor");
    let frames: Vec<PoseLandmarks> = (0..300).map(|i| landmarks(f64::from(i) * 0.1)).collect();

    for filter_name in ["none", "moving_average:5", "exponential:0.5"] {
        let filter = create_filter(filter_name).unwrap_or_else(|_| Box::new(NoFilter));
        let mut monitor =
            PostureMonitor::new(TrackerConfig::default(), filter, 0.5, RecordingSink::default()).unwrap();

        group.bench_with_input(BenchmarkId::new("frames_300", filter_name), &frames, |b, data| {
            b.iter(|| {
                monitor.reset();
                for frame in data {
                    black_box(monitor.process(Some(black_box(frame))));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_angles, benchmark_tracker, benchmark_monitor);
criterion_main!(benches);
