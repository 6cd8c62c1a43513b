//! Benchmarks for the state-variable filter stage.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use commlab::graph::{filter::FilterStage, node::GraphNode, RenderCtx};
use commlab::model::{FilterConfiguration, FilterKind};

use crate::BLOCK_SIZES;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");
    let ctx = RenderCtx::new(48_000.0);

    for &size in BLOCK_SIZES {
        // Generate a test signal (sawtooth-like ramp)
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        // Settled parameters take the fast path
        for kind in FilterKind::ALL {
            let config = FilterConfiguration {
                kind,
                q_factor: 2.0,
                ..FilterConfiguration::default()
            };
            let mut stage = FilterStage::new(&config);
            let mut buffer = input.clone();
            group.bench_with_input(BenchmarkId::new(kind.label(), size), &size, |b, _| {
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    stage.render_block(black_box(&mut buffer), black_box(&ctx));
                })
            });
        }

        // Gliding cutoff recomputes coefficients every sample
        let mut stage = FilterStage::new(&FilterConfiguration::default()).with_time_constant(1.0e6);
        stage.apply(
            &FilterConfiguration {
                cutoff_hz: 4_000.0,
                ..FilterConfiguration::default()
            },
            0.0,
        );
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("ramping", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                stage.render_block(black_box(&mut buffer), black_box(&ctx));
            })
        });
    }

    group.finish();
}
