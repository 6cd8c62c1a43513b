#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cutoff range accepted by the filter stage and produced by auto-tune (Hz)
pub const CUTOFF_RANGE: (f32, f32) = (20.0, 8_000.0);
/// Q range exposed to callers
pub const Q_RANGE: (f32, f32) = (0.1, 15.0);

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    LowPass,
    HighPass,
    BandPass,
    BandStop,
}

impl FilterKind {
    pub const ALL: [FilterKind; 4] = [
        FilterKind::LowPass,
        FilterKind::HighPass,
        FilterKind::BandPass,
        FilterKind::BandStop,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FilterKind::LowPass => "low-pass",
            FilterKind::HighPass => "high-pass",
            FilterKind::BandPass => "band-pass",
            FilterKind::BandStop => "band-stop",
        }
    }

    /// The next kind in [`FilterKind::ALL`], wrapping around.
    pub fn next(self) -> Self {
        let index = FilterKind::ALL
            .iter()
            .position(|&k| k == self)
            .unwrap_or(0);
        FilterKind::ALL[(index + 1) % FilterKind::ALL.len()]
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuningMode {
    Manual,
    /// Auto-tune requests are honoured
    Adaptive,
}

/// Settings for the single second-order filter stage.
///
/// `order` is carried for display; the stage is always one second-order
/// section.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterConfiguration {
    pub kind: FilterKind,
    pub cutoff_hz: f32,
    pub q_factor: f32,
    pub order: u32,
    pub tuning_mode: TuningMode,
}

impl Default for FilterConfiguration {
    fn default() -> Self {
        Self {
            kind: FilterKind::LowPass,
            cutoff_hz: 1_000.0,
            q_factor: 1.0,
            order: 2,
            tuning_mode: TuningMode::Manual,
        }
    }
}

impl FilterConfiguration {
    /// Clamp cutoff and Q into the ranges the controls expose.
    pub fn clamped(self) -> Self {
        Self {
            cutoff_hz: self.cutoff_hz.clamp(CUTOFF_RANGE.0, CUTOFF_RANGE.1),
            q_factor: self.q_factor.clamp(Q_RANGE.0, Q_RANGE.1),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_cycles_through_all_kinds() {
        let mut kind = FilterKind::LowPass;
        for _ in 0..FilterKind::ALL.len() {
            kind = kind.next();
        }
        assert_eq!(kind, FilterKind::LowPass);
        assert_eq!(FilterKind::BandStop.next(), FilterKind::LowPass);
    }

    #[test]
    fn test_clamped_keeps_kind_and_mode() {
        let config = FilterConfiguration {
            kind: FilterKind::HighPass,
            cutoff_hz: 12_000.0,
            q_factor: 0.0,
            order: 2,
            tuning_mode: TuningMode::Adaptive,
        }
        .clamped();

        assert_eq!(config.kind, FilterKind::HighPass);
        assert_eq!(config.tuning_mode, TuningMode::Adaptive);
        assert_eq!(config.cutoff_hz, 8_000.0);
        assert_eq!(config.q_factor, 0.1);
    }
}
