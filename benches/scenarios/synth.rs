//! Benchmarks for every signal kind through the render pipeline.
//!
//! Synthesis, filtering, the observation tap and the monitor gain: exactly
//! what the audio callback runs.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion};
use commlab::{
    engine::{Pipeline, SharedState},
    model::{FilterConfiguration, SignalKind, SignalModel},
    observe::observation_channel,
    synth::Synthesizer,
    MAX_BLOCK_SIZE,
};

use crate::BLOCK_SIZES;

const SR: f32 = 48_000.0;

pub fn bench_synth(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/pipeline");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for kind in SignalKind::ALL {
            let shared = Arc::new(SharedState::new(
                SignalModel::default(),
                FilterConfiguration::default(),
            ));
            let (tap, mut bus) = observation_channel(16 * MAX_BLOCK_SIZE, 2048, 0.8);
            let mut pipeline = Pipeline::new(Synthesizer::new(SR), shared, tap, 0.4);
            pipeline.start(&SignalModel::default().with_kind(kind));

            group.bench_with_input(BenchmarkId::new(kind.label(), size), &size, |b, _| {
                b.iter(|| {
                    pipeline.render(black_box(&mut buffer));
                    // Keep the ring from filling up
                    bus.drain();
                })
            });
        }
    }

    group.finish();
}
