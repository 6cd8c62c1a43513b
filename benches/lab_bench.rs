//! Benchmarks for the lab's signal path and analysis.
//!
//! Run with: cargo bench
//!
//! The audio path must finish well within the block deadline; the analysis
//! pass must fit comfortably in one display refresh.
//!
//! Reference timing at 48kHz sample rate:
//!   - 64 samples  = 1.33ms deadline
//!   - 128 samples = 2.67ms deadline
//!   - 256 samples = 5.33ms deadline
//!   - 512 samples = 10.67ms deadline
//!   - one refresh at 60 Hz = 16.7ms
//!
//! Benchmark groups:
//!   - dsp/*        Low-level primitives (oscillator, filter stage)
//!   - scenarios/*  Every signal kind through the pipeline, full analysis pass

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

/// Common buffer sizes used in audio applications.
pub const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

criterion_group!(
    benches,
    // Low-level DSP primitives
    dsp::bench_oscillator,
    dsp::bench_filter,
    // Real-world scenarios
    scenarios::bench_synth,
    scenarios::bench_analysis,
);
criterion_main!(benches);
