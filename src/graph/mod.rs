//! Composable building blocks for the lab's signal path.
//!
//! Graph nodes wrap the low-level DSP primitives with block-based rendering
//! and composition: generators, modulation, weighted sums and the filter
//! stage. The `extensions` module adds fluent helpers so chains read in
//! signal-flow order.

/// Multiply a signal by a gain signal (amplitude modulation).
pub mod amplify;
/// Fluent combinators (`.amplify()`, `.through()`).
pub mod extensions;
/// The configurable second-order filter stage.
pub mod filter;
/// Live capture playback.
pub mod live;
/// N-way weighted sum for composite signals.
pub mod mix;
/// AM envelope and FM carrier nodes.
pub mod modulate;
/// Core traits shared by all graph nodes.
pub mod node;
/// Looped white noise.
pub mod noise;
/// Periodic carriers.
pub mod oscillator;
/// Serial chaining of two nodes (source → effect).
pub mod through;

pub use node::{GraphNode, RenderCtx};
