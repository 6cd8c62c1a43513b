//! Low-level DSP primitive benchmarks.

mod filter;
mod oscillator;

pub use filter::bench_filter;
pub use oscillator::bench_oscillator;
