use crate::model::{filter::CUTOFF_RANGE, FilterKind};

/// Cutoff multiplier above the dominant frequency for a low-pass
pub const LOW_PASS_MARGIN: f32 = 1.5;
/// Cutoff multiplier below the dominant frequency for a high-pass
pub const HIGH_PASS_MARGIN: f32 = 0.7;

/// Index of the first maximum of `spectrum`, scanning from bin 0.
///
/// NaN bins never win. An empty spectrum yields bin 0.
pub fn dominant_bin(spectrum: &[f32]) -> usize {
    let mut best = 0;
    let mut best_value = f32::NEG_INFINITY;
    for (i, &value) in spectrum.iter().enumerate() {
        if value > best_value {
            best = i;
            best_value = value;
        }
    }
    best
}

/// Frequency of the dominant bin as `index × sample_rate / (2 × len)`.
///
/// `len` is the number of bins, which is half the transform size.
pub fn dominant_frequency(spectrum: &[f32], sample_rate: f32) -> f32 {
    if spectrum.is_empty() {
        return 0.0;
    }
    dominant_bin(spectrum) as f32 * sample_rate / (2.0 * spectrum.len() as f32)
}

/// Propose a cutoff for `kind` from the raw spectrum.
///
/// Low-pass lands 50% above the dominant component so it passes, high-pass
/// 30% below it; the band kinds sit on it. The result is rounded to whole Hz
/// and kept within the cutoff range.
pub fn suggest_cutoff(raw_spectrum_db: &[f32], kind: FilterKind, sample_rate: f32) -> f32 {
    let dominant = dominant_frequency(raw_spectrum_db, sample_rate);
    let target = match kind {
        FilterKind::LowPass => dominant * LOW_PASS_MARGIN,
        FilterKind::HighPass => dominant * HIGH_PASS_MARGIN,
        FilterKind::BandPass | FilterKind::BandStop => dominant,
    };
    target.round().clamp(CUTOFF_RANGE.0, CUTOFF_RANGE.1)
}
