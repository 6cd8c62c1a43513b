// Purpose: Turn a SignalModel into running generators
// This layer sits above graph nodes and owns exactly one source at a time

pub mod handle;
pub mod synthesizer;

pub use handle::{SourceStatus, SynthesisHandle};
pub use synthesizer::{SourceFactory, Synthesizer, COMPOSITE_PARTIALS};
