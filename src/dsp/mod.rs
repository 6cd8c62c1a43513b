//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! These components are allocation-free once constructed and realtime-safe,
//! so they can be driven directly from the audio callback. They stay focused
//! on the signal-processing math; the graph layer adds composition.

/// State-variable filter with smoothed cutoff and Q.
pub mod filter;
/// AM envelope and FM deviation math.
pub mod modulate;
/// Looped white-noise buffer.
pub mod noise;
/// Phase-accumulator oscillator waveforms.
pub mod oscillator;
/// Exponential parameter ramps.
pub mod smoothing;
