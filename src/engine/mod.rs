//! Ownership of the running laboratory.
//!
//! The audio callback renders through a [`Pipeline`] behind a mutex, the
//! refresh task runs on its own thread, and both meet in [`SharedState`]:
//! atomically swapped snapshots of the signal model, the filter
//! configuration and the latest display frame.

pub mod lab;
pub mod pipeline;
pub mod refresh;
pub mod settings;
pub mod shared;

pub use lab::{AudioRenderer, Lab, LabBuilder};
pub use pipeline::Pipeline;
pub use refresh::{RefreshTask, RefreshWorker};
pub use settings::AudioSettings;
pub use shared::SharedState;
