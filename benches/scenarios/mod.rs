//! Real-world scenario benchmarks.
//!
//! Every signal kind through synthesis and filtering, and one complete
//! refresh pass over full observation windows.

mod analysis;
mod synth;

pub use analysis::bench_analysis;
pub use synth::bench_synth;
