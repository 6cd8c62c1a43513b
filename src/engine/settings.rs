#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{LabError, FFT_SIZE, MAX_BLOCK_SIZE};

/// Smallest transform that still covers the 512-sample time series
pub const MIN_FFT_SIZE: usize = 512;
pub const MAX_FFT_SIZE: usize = 32_768;

/// Runtime parameters of the audio and refresh paths
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioSettings {
    /// Window length of both observation points
    pub fft_size: usize,
    /// Analyser smoothing between frames, 0 = none
    pub smoothing: f32,
    /// Display refresh rate
    pub refresh_hz: f32,
    /// Observation ring capacity in blocks of `MAX_BLOCK_SIZE` frames
    pub ring_blocks: usize,
    /// Monitor output gain before the signal amplitude is applied
    pub monitor_gain: f32,
    /// Open the default capture device for live input
    pub live_input: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            fft_size: FFT_SIZE,
            smoothing: 0.8,
            refresh_hz: 60.0,
            ring_blocks: 16,
            monitor_gain: 0.4,
            live_input: false,
        }
    }
}

impl AudioSettings {
    /// Observation ring capacity in frames
    pub fn ring_capacity(&self) -> usize {
        self.ring_blocks * MAX_BLOCK_SIZE
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), LabError> {
        if !self.fft_size.is_power_of_two()
            || !(MIN_FFT_SIZE..=MAX_FFT_SIZE).contains(&self.fft_size)
        {
            return Err(LabError::InvalidConfig {
                field: "audio.fft_size",
                reason: format!(
                    "{} is not a power of two between {} and {}",
                    self.fft_size, MIN_FFT_SIZE, MAX_FFT_SIZE
                ),
            });
        }
        if !(0.0..1.0).contains(&self.smoothing) {
            return Err(LabError::InvalidConfig {
                field: "audio.smoothing",
                reason: format!("{} is outside [0, 1)", self.smoothing),
            });
        }
        if !(self.refresh_hz > 0.0 && self.refresh_hz <= 240.0) {
            return Err(LabError::InvalidConfig {
                field: "audio.refresh_hz",
                reason: format!("{} is outside (0, 240]", self.refresh_hz),
            });
        }
        if self.ring_blocks == 0 {
            return Err(LabError::InvalidConfig {
                field: "audio.ring_blocks",
                reason: "must hold at least one block".into(),
            });
        }
        if !(0.0..=1.0).contains(&self.monitor_gain) {
            return Err(LabError::InvalidConfig {
                field: "audio.monitor_gain",
                reason: format!("{} is outside [0, 1]", self.monitor_gain),
            });
        }
        Ok(())
    }
}
