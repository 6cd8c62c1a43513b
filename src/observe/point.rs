use crate::observe::analyser::SpectrumAnalyser;

/// Time and frequency view of one observation point at one instant.
///
/// `time_domain` holds `fft_size` samples, oldest first; `frequency_db` holds
/// `fft_size / 2` bins.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationSnapshot {
    pub time_domain: Vec<f32>,
    pub frequency_db: Vec<f32>,
}

/// Rolling window of the latest `fft_size` samples seen at one point of the
/// signal path, with its own analyser.
pub struct ObservationPoint {
    history: Vec<f32>,
    write_pos: usize,
    analyser: SpectrumAnalyser,
}

impl ObservationPoint {
    pub fn new(fft_size: usize, smoothing: f32) -> Self {
        Self {
            history: vec![0.0; fft_size],
            write_pos: 0,
            analyser: SpectrumAnalyser::new(fft_size, smoothing),
        }
    }

    #[inline]
    pub fn push(&mut self, sample: f32) {
        self.history[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % self.history.len();
    }

    /// Copy the window out in chronological order.
    pub fn time_domain(&self) -> Vec<f32> {
        let (newer, older) = self.history.split_at(self.write_pos);
        older.iter().chain(newer).copied().collect()
    }

    /// Capture the window and analyse it.
    pub fn snapshot(&mut self) -> ObservationSnapshot {
        let time_domain = self.time_domain();
        let frequency_db = self.analyser.process(&time_domain).to_vec();
        ObservationSnapshot {
            time_domain,
            frequency_db,
        }
    }

    /// Clear history and smoothing state.
    pub fn reset(&mut self) {
        self.history.fill(0.0);
        self.write_pos = 0;
        self.analyser.reset();
    }
}
