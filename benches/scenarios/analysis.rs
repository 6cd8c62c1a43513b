//! Benchmark for one complete refresh pass.

use std::hint::black_box;

use criterion::Criterion;
use commlab::{
    analysis::{compute_frame, suggest_cutoff},
    model::{FilterConfiguration, FilterKind},
    observe::observation_channel,
    synth::SourceStatus,
};

const SR: f32 = 48_000.0;

pub fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/analysis");

    let raw: Vec<f32> = (0..2048)
        .map(|i| (std::f32::consts::TAU * 440.0 * i as f32 / SR).sin())
        .collect();
    let filtered: Vec<f32> = raw.iter().map(|s| s * 0.5).collect();
    let filter = FilterConfiguration::default();

    let (mut tap, mut bus) = observation_channel(4096, 2048, 0.8);

    // Drain, window, two FFTs and every display series
    group.bench_function("refresh_pass", |b| {
        b.iter(|| {
            tap.push_block(&raw[..800], &filtered[..800]);
            bus.drain();
            let pair = bus.capture();
            black_box(compute_frame(
                black_box(pair.as_ref()),
                &filter,
                SR,
                SourceStatus::Active,
            ))
        })
    });

    let (mut tap, mut bus) = observation_channel(4096, 2048, 0.0);
    tap.push_block(&raw, &filtered);
    bus.drain();
    let spectrum = bus.capture().map(|pair| pair.raw.frequency_db).unwrap_or_default();
    group.bench_function("auto_tune", |b| {
        b.iter(|| suggest_cutoff(black_box(&spectrum), FilterKind::LowPass, SR))
    });

    group.finish();
}
