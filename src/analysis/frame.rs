use crate::analysis::series::{
    frequency_series, impulse_series, snr_db, time_series, FrequencyPoint, ImpulsePoint, TimePoint,
};
use crate::model::FilterConfiguration;
use crate::observe::SnapshotPair;
use crate::synth::SourceStatus;

/// Everything one refresh pass derives, published as a unit.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayFrame {
    pub time: Vec<TimePoint>,
    pub frequency: Vec<FrequencyPoint>,
    pub impulse: Vec<ImpulsePoint>,
    pub snr_db: f32,
    pub status: SourceStatus,
    /// Filter configuration the frame was computed against
    pub filter: FilterConfiguration,
    pub sample_rate: f32,
    pub fft_size: usize,
}

impl DisplayFrame {
    /// Whether the frame carries observed data
    pub fn has_signal(&self) -> bool {
        !self.time.is_empty()
    }
}

/// Derive a display frame from one snapshot pair.
///
/// Pure: the same inputs always produce the same frame. Without snapshots
/// the time and frequency series are empty and the SNR reads 0 dB.
pub fn compute_frame(
    snapshots: Option<&SnapshotPair>,
    filter: &FilterConfiguration,
    sample_rate: f32,
    status: SourceStatus,
) -> DisplayFrame {
    let (time, frequency, snr) = match snapshots {
        Some(pair) => {
            let fft_size = pair.raw.time_domain.len();
            (
                time_series(&pair.raw.time_domain, &pair.filtered.time_domain),
                frequency_series(
                    &pair.raw.frequency_db,
                    &pair.filtered.frequency_db,
                    filter,
                    sample_rate,
                    fft_size,
                ),
                snr_db(&pair.raw.time_domain, &pair.filtered.time_domain),
            )
        }
        None => (Vec::new(), Vec::new(), 0.0),
    };

    DisplayFrame {
        time,
        frequency,
        impulse: impulse_series(filter.cutoff_hz),
        snr_db: snr,
        status,
        filter: *filter,
        sample_rate,
        fft_size: snapshots.map_or(0, |pair| pair.raw.time_domain.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observe::ObservationSnapshot;

    fn snapshot(value: f32) -> ObservationSnapshot {
        ObservationSnapshot {
            time_domain: vec![value; 2048],
            frequency_db: vec![-40.0; 1024],
        }
    }

    #[test]
    fn test_frame_without_snapshots_is_empty_not_failed() {
        let frame = compute_frame(
            None,
            &FilterConfiguration::default(),
            48_000.0,
            SourceStatus::Stopped,
        );
        assert!(!frame.has_signal());
        assert!(frame.frequency.is_empty());
        assert_eq!(frame.snr_db, 0.0);
        assert_eq!(frame.impulse.len(), 50);
    }

    #[test]
    fn test_frame_series_lengths_and_snr() {
        let pair = SnapshotPair {
            raw: snapshot(1.0),
            filtered: snapshot(0.5),
        };
        let frame = compute_frame(
            Some(&pair),
            &FilterConfiguration::default(),
            48_000.0,
            SourceStatus::Active,
        );

        assert_eq!(frame.time.len(), 128);
        assert_eq!(frame.frequency.len(), 128);
        assert_eq!(frame.fft_size, 2048);
        // Energy ratio 4:1
        assert!((frame.snr_db - 6.0206).abs() < 1e-2, "got {}", frame.snr_db);
        assert!((frame.frequency[0].raw - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_frame_is_deterministic() {
        let pair = SnapshotPair {
            raw: snapshot(0.3),
            filtered: snapshot(0.1),
        };
        let filter = FilterConfiguration::default();
        let a = compute_frame(Some(&pair), &filter, 44_100.0, SourceStatus::Active);
        let b = compute_frame(Some(&pair), &filter, 44_100.0, SourceStatus::Active);
        assert_eq!(a, b);
    }

    #[test]
    fn test_smallest_fft_size_keeps_fixed_series() {
        // 512-point transform: 512 samples, 256 bins of 93.75 Hz
        let low_bins_only = |db: f32| ObservationSnapshot {
            time_domain: (0..512).map(|n| n as f32 / 512.0).collect(),
            frequency_db: (0..256).map(|k| if k < 128 { db } else { 0.0 }).collect(),
        };
        let pair = SnapshotPair {
            raw: low_bins_only(-20.0),
            filtered: low_bins_only(-60.0),
        };
        let frame = compute_frame(
            Some(&pair),
            &FilterConfiguration::default(),
            48_000.0,
            SourceStatus::Active,
        );

        assert_eq!(frame.fft_size, 512);
        assert_eq!(frame.time.len(), 128);
        assert_eq!(frame.time[127].sample_index, 508);
        assert!((frame.time[127].raw - 508.0 / 512.0).abs() < 1e-6);

        assert_eq!(frame.frequency.len(), 128);
        assert_eq!(frame.frequency[1].frequency_hz, 93.75);
        assert_eq!(frame.frequency[127].frequency_hz, 127.0 * 93.75);
        // Only the lowest 128 of the 256 bins are shown
        assert!(frame.frequency.iter().all(|p| (p.raw - 0.8).abs() < 1e-6));
        assert!(frame.frequency.iter().all(|p| (p.filtered - 0.4).abs() < 1e-6));
    }
}
