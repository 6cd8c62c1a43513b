//! Benchmarks for carrier generation and the noise loop.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use commlab::dsp::{noise::NoiseLoop, oscillator::OscillatorBlock};

use crate::BLOCK_SIZES;

const SR: f32 = 48_000.0;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Sine - uses sin() transcendental function
        let mut osc = OscillatorBlock::sine();
        group.bench_with_input(BenchmarkId::new("sine", size), &size, |b, _| {
            b.iter(|| osc.render(black_box(&mut buffer), black_box(440.0), SR))
        });

        // Square - branch per sample
        let mut osc = OscillatorBlock::square();
        group.bench_with_input(BenchmarkId::new("square", size), &size, |b, _| {
            b.iter(|| osc.render(black_box(&mut buffer), black_box(440.0), SR))
        });

        // Triangle - absolute value
        let mut osc = OscillatorBlock::triangle();
        group.bench_with_input(BenchmarkId::new("triangle", size), &size, |b, _| {
            b.iter(|| osc.render(black_box(&mut buffer), black_box(440.0), SR))
        });

        // Per-sample frequency, as driven by FM
        let frequencies: Vec<f32> = (0..size).map(|i| 440.0 + i as f32 * 0.1).collect();
        let mut osc = OscillatorBlock::sine();
        group.bench_with_input(BenchmarkId::new("sine_modulated", size), &size, |b, _| {
            b.iter(|| osc.render_modulated(black_box(&mut buffer), black_box(&frequencies), SR))
        });

        // Noise - table lookup
        let mut noise = NoiseLoop::new(SR);
        group.bench_with_input(BenchmarkId::new("noise_loop", size), &size, |b, _| {
            b.iter(|| noise.render(black_box(&mut buffer)))
        });
    }

    group.finish();
}
