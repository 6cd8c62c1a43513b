//! Plain-data descriptions of what to synthesize and how to filter it.
//!
//! These are immutable snapshots: the front-end builds a new value and swaps it
//! in whole, the audio path and the refresh task only ever read them.

/// Second-order filter settings.
pub mod filter;
/// Signal kinds and their parameters.
pub mod signal;

pub use filter::{FilterConfiguration, FilterKind, TuningMode};
pub use signal::{SignalKind, SignalModel};
