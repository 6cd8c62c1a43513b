//! TOML configuration for the laboratory.
//!
//! Every section and field is optional; anything missing takes its default.
//!
//! ```toml
//! [audio]
//! fft_size = 2048
//! smoothing = 0.8
//! refresh_hz = 60.0
//!
//! [signal]
//! kind = "amplitude_modulated"
//! carrier_frequency_hz = 880.0
//!
//! [filter]
//! kind = "high_pass"
//! cutoff_hz = 500.0
//! tuning_mode = "adaptive"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{
    engine::AudioSettings,
    model::{FilterConfiguration, SignalModel},
    LabError,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabConfig {
    #[serde(default)]
    pub audio: AudioSettings,
    /// Signal played when the lab starts
    #[serde(default)]
    pub signal: SignalModel,
    /// Filter configuration the lab starts with
    #[serde(default)]
    pub filter: FilterConfiguration,
}

impl LabConfig {
    /// Read, parse and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, LabError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration text.
    ///
    /// Signal and filter values outside the control ranges are clamped
    /// rather than rejected.
    pub fn from_toml_str(content: &str) -> Result<Self, LabError> {
        let config: LabConfig = toml::from_str(content)?;
        config.audio.validate()?;
        Ok(Self {
            signal: config.signal.clamped(),
            filter: config.filter.clamped(),
            ..config
        })
    }
}
