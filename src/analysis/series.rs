use crate::analysis::response::magnitude_at;
use crate::model::FilterConfiguration;

/// Points in the time-domain display series
pub const TIME_SERIES_POINTS: usize = 128;
/// Decimation stride of the time series (128 points cover 512 samples)
pub const TIME_SERIES_STRIDE: usize = 4;
/// Bins in the frequency display series
pub const FREQUENCY_SERIES_POINTS: usize = 128;
/// Points in the impulse display series
pub const IMPULSE_SERIES_POINTS: usize = 50;

/// Added to the filtered energy so a silent output cannot divide by zero
const SNR_EPSILON: f32 = 1e-5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimePoint {
    pub sample_index: usize,
    pub raw: f32,
    pub filtered: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyPoint {
    pub frequency_hz: f32,
    /// Normalized magnitude, 0 at −100 dB and 1 at 0 dB
    pub raw: f32,
    pub filtered: f32,
    /// Idealized response of the configured filter, 0..1
    pub theoretical: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpulsePoint {
    pub step_index: usize,
    pub value: f32,
}

/// Decimate the start of both windows to 128 points.
///
/// Missing samples read as 0, so the series always has 128 points.
pub fn time_series(raw: &[f32], filtered: &[f32]) -> Vec<TimePoint> {
    (0..TIME_SERIES_POINTS)
        .map(|i| {
            let sample_index = i * TIME_SERIES_STRIDE;
            TimePoint {
                sample_index,
                raw: raw.get(sample_index).copied().unwrap_or(0.0),
                filtered: filtered.get(sample_index).copied().unwrap_or(0.0),
            }
        })
        .collect()
}

/// Map a dB reading onto the display scale: −100 dB → 0, 0 dB → 1.
pub fn normalize_db(db: f32) -> f32 {
    ((db + 100.0) / 100.0).max(0.0)
}

/// The lowest 128 bins of both spectra with the theoretical response.
///
/// Bin `k` sits at `k × sample_rate / fft_size` Hz. Missing bins read as
/// silence.
pub fn frequency_series(
    raw_db: &[f32],
    filtered_db: &[f32],
    filter: &FilterConfiguration,
    sample_rate: f32,
    fft_size: usize,
) -> Vec<FrequencyPoint> {
    let bin_hz = sample_rate / fft_size.max(1) as f32;
    let level = |spectrum: &[f32], bin: usize| {
        spectrum.get(bin).copied().map_or(0.0, normalize_db)
    };

    (0..FREQUENCY_SERIES_POINTS)
        .map(|bin| {
            let frequency_hz = bin as f32 * bin_hz;
            FrequencyPoint {
                frequency_hz,
                raw: level(raw_db, bin),
                filtered: level(filtered_db, bin),
                theoretical: magnitude_at(filter.kind, filter.cutoff_hz, frequency_hz),
            }
        })
        .collect()
}

/// Sum of squares
pub fn energy(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s * s).sum()
}

/// Energy ratio between the raw and filtered windows, in dB.
///
/// This is a proxy for how much the filter removes, not a true SNR: a filter
/// that passes everything reads 0 dB. Always finite; a silent input reads
/// 0 dB.
pub fn snr_db(raw: &[f32], filtered: &[f32]) -> f32 {
    snr_from_energy(energy(raw), energy(filtered))
}

pub fn snr_from_energy(raw_energy: f32, filtered_energy: f32) -> f32 {
    if raw_energy <= 0.0 {
        return 0.0;
    }
    let db = 10.0 * (raw_energy / (filtered_energy + SNR_EPSILON)).log10();
    if db.is_finite() {
        db
    } else {
        0.0
    }
}

/// Decaying sinusoid whose rate follows the cutoff.
///
/// A visual stand-in for an impulse response; nothing is measured.
pub fn impulse_series(cutoff_hz: f32) -> Vec<ImpulsePoint> {
    (0..IMPULSE_SERIES_POINTS)
        .map(|i| {
            let t = i as f32;
            ImpulsePoint {
                step_index: i,
                value: (-t * cutoff_hz / 2_000.0).exp() * (t * cutoff_hz / 500.0).sin(),
            }
        })
        .collect()
}
