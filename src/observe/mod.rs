//! Observation points between the audio path and analysis.
//!
//! The audio callback pushes paired (raw, filtered) frames through one
//! lock-free ring. The refresh task drains that ring into two rolling windows
//! and analyses both from the same instants.

pub mod analyser;
pub mod bus;
pub mod point;
pub mod tap;

pub use analyser::{SpectrumAnalyser, DB_FLOOR};
pub use bus::{observation_channel, ObservationBus, SnapshotPair};
pub use point::{ObservationPoint, ObservationSnapshot};
pub use tap::{ObservationTap, TapFrame};
