pub mod analysis; // Theoretical response, spectra, display series, auto-tune
#[cfg(feature = "serde")]
pub mod config;
pub mod dsp;
pub mod engine; // Pipeline ownership, shared configuration, refresh task
pub mod error;
pub mod graph; // Composable audio graph nodes
pub mod io;
pub mod model;
pub mod observe; // Observation points between the audio path and analysis
pub mod synth; // Signal synthesizer

pub use error::LabError;

pub const MAX_BLOCK_SIZE: usize = 2048;

/// Default transform size for both observation points.
pub const FFT_SIZE: usize = 2048;
