#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Carrier range exposed to callers (Hz)
pub const CARRIER_RANGE: (f32, f32) = (100.0, 5_000.0);
/// Modulator range exposed to callers (Hz)
pub const MODULATOR_RANGE: (f32, f32) = (5.0, 200.0);

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Sine,
    Square,
    Triangle,
    Composite,
    AmplitudeModulated,
    FrequencyModulated,
    Noise,
    LiveInput,
}

impl SignalKind {
    pub const ALL: [SignalKind; 8] = [
        SignalKind::Sine,
        SignalKind::Square,
        SignalKind::Triangle,
        SignalKind::Composite,
        SignalKind::AmplitudeModulated,
        SignalKind::FrequencyModulated,
        SignalKind::Noise,
        SignalKind::LiveInput,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SignalKind::Sine => "sine",
            SignalKind::Square => "square",
            SignalKind::Triangle => "triangle",
            SignalKind::Composite => "composite",
            SignalKind::AmplitudeModulated => "am",
            SignalKind::FrequencyModulated => "fm",
            SignalKind::Noise => "noise",
            SignalKind::LiveInput => "live",
        }
    }

    /// Whether the modulator frequency and depth mean anything for this kind
    pub fn is_modulated(self) -> bool {
        matches!(
            self,
            SignalKind::AmplitudeModulated | SignalKind::FrequencyModulated
        )
    }
}

impl std::str::FromStr for SignalKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        SignalKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.label() == lower)
            .or(match lower.as_str() {
                "amplitude_modulated" => Some(SignalKind::AmplitudeModulated),
                "frequency_modulated" => Some(SignalKind::FrequencyModulated),
                "live_input" | "voice" => Some(SignalKind::LiveInput),
                _ => None,
            })
            .ok_or_else(|| format!("unknown signal kind `{}`", s))
    }
}

/// What the synthesizer should generate.
///
/// `modulator_frequency_hz` and `modulation_depth` are ignored unless
/// [`SignalKind::is_modulated`]. `amplitude` scales the monitor output only;
/// the observation points always see the unscaled signal.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalModel {
    pub kind: SignalKind,
    pub carrier_frequency_hz: f32,
    pub modulator_frequency_hz: f32,
    pub modulation_depth: f32,
    pub amplitude: f32,
}

impl Default for SignalModel {
    fn default() -> Self {
        Self {
            kind: SignalKind::Sine,
            carrier_frequency_hz: 440.0,
            modulator_frequency_hz: 20.0,
            modulation_depth: 0.5,
            amplitude: 0.5,
        }
    }
}

impl SignalModel {
    pub fn with_kind(self, kind: SignalKind) -> Self {
        Self { kind, ..self }
    }

    /// Clamp every field into the range the controls expose.
    pub fn clamped(self) -> Self {
        Self {
            kind: self.kind,
            carrier_frequency_hz: self
                .carrier_frequency_hz
                .clamp(CARRIER_RANGE.0, CARRIER_RANGE.1),
            modulator_frequency_hz: self
                .modulator_frequency_hz
                .clamp(MODULATOR_RANGE.0, MODULATOR_RANGE.1),
            modulation_depth: self.modulation_depth.clamp(0.0, 1.0),
            amplitude: self.amplitude.clamp(0.0, 1.0),
        }
    }

    /// True when both models need the same generators, i.e. they differ in
    /// `amplitude` at most.
    pub fn same_source(&self, other: &SignalModel) -> bool {
        Self {
            amplitude: other.amplitude,
            ..*self
        } == *other
    }
}
