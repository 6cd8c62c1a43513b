//! Everything derived from the observation points once per refresh.
//!
//! All functions here are pure. The refresh task feeds them the latest
//! snapshot pair and the current filter configuration and publishes the
//! resulting [`DisplayFrame`].

pub mod autotune;
pub mod frame;
pub mod response;
pub mod series;

pub use autotune::suggest_cutoff;
pub use frame::{compute_frame, DisplayFrame};
pub use response::magnitude_at;
pub use series::{FrequencyPoint, ImpulsePoint, TimePoint};
