//! Per-frame evaluation benchmarks.
//!
//! Run with: `cargo bench --bench frame_eval`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use motionkit_core::curve::{CurveFit, CurveType};
use motionkit_core::cycle::KeyCycleOscillator;
use motionkit_core::oscillator::WaveShape;
use motionkit_core::stop::{SpringStopEngine, StopEngine};

fn dense_curve(points: usize, dim: usize) -> CurveFit {
    let time: Vec<f64> = (0..points).map(|i| i as f64 / (points - 1) as f64).collect();
    let values: Vec<Vec<f64>> = (0..points)
        .map(|i| (0..dim).map(|j| ((i * 7 + j * 3) % 11) as f64).collect())
        .collect();
    CurveFit::new(CurveType::Spline, &time, &values).unwrap()
}

fn bench_spline_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("spline_eval");
    for &points in &[4usize, 16, 64] {
        let curve = dense_curve(points, 3);
        let mut out = [0.0f64; 3];
        group.bench_function(format!("{points}_keyframes"), |bench| {
            bench.iter(|| {
                for i in 0..100 {
                    curve.get_pos(black_box(i as f64 / 100.0), &mut out);
                }
                black_box(out);
            });
        });
    }
    group.finish();
}

fn bench_cycle_eval(c: &mut Criterion) {
    let mut osc = KeyCycleOscillator::new();
    for p in [0, 25, 50, 75, 100] {
        osc.set_point(p, WaveShape::Sin, None, None, 2.0, 0.5, 0.0, 1.0);
    }
    osc.setup(0.0).unwrap();
    c.bench_function("cycle_eval_100_samples", |bench| {
        bench.iter(|| {
            let mut acc = 0.0f32;
            for i in 0..100 {
                acc += osc.get(black_box(i as f32 / 100.0)).unwrap();
            }
            black_box(acc);
        });
    });
}

fn bench_spring_step(c: &mut Criterion) {
    c.bench_function("spring_1000_steps", |bench| {
        bench.iter(|| {
            let mut spring = SpringStopEngine::new();
            spring
                .spring_config(0.0, 1.0, 0.0, 1.0, 40.0, 2.0, 0.001, 0)
                .unwrap();
            let mut pos = 0.0;
            for i in 1..=1000 {
                pos = spring.get_interpolation(black_box(i as f32 * 0.004));
            }
            black_box(pos);
        });
    });
}

criterion_group!(benches, bench_spline_eval, bench_cycle_eval, bench_spring_step);
criterion_main!(benches);
