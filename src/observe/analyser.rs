use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/*
Spectrum Analyser
=================

Turns the latest `fft_size` samples of an observation point into a dB
magnitude spectrum with `fft_size / 2` bins.

  1. Blackman window
       w[i] = 0.42 − 0.5·cos(2πi/N) + 0.08·cos(4πi/N)
     Side lobes sit ~58 dB down, so a clean tone does not smear across the
     whole display.

  2. Forward FFT, magnitude per bin normalized by N:
       |X[k]| / N

  3. Temporal smoothing between successive frames:
       X̂[k] = τ·X̂_prev[k] + (1 − τ)·|X[k]|/N        τ ∈ [0, 1)
     τ = 0 shows every frame as-is; 0.8 gives the calm, slightly lagging
     display of a hardware analyser.

  4. Decibels with a power floor, so digital silence reads as −120 dB rather
     than −∞:
       dB[k] = 10·log10(max(X̂[k]², 1e-12))

Bin k sits at k × sample_rate / fft_size Hz.

A full-scale sine lands near −13.5 dB: half the energy goes to the negative
frequency mirror (−6 dB) and the Blackman window's coherent gain is 0.42
(−7.5 dB).
*/

/// Lowest value the analyser reports, in dB
pub const DB_FLOOR: f32 = -120.0;

const POWER_FLOOR: f32 = 1e-12;

pub struct SpectrumAnalyser {
    /// Blackman window coefficients
    window: Vec<f32>,
    fft: Arc<dyn Fft<f32>>,
    /// Working buffer for the in-place transform
    scratch: Vec<Complex<f32>>,
    /// Smoothed linear magnitudes, one per bin
    smoothed: Vec<f32>,
    smoothing: f32,
    /// Latest spectrum in dB
    spectrum_db: Vec<f32>,
}

impl SpectrumAnalyser {
    /// `fft_size` must be a power of two; `smoothing` is clamped to [0, 1).
    pub fn new(fft_size: usize, smoothing: f32) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);
        let bins = fft_size / 2;

        Self {
            window: blackman(fft_size),
            fft,
            scratch: vec![Complex::new(0.0, 0.0); fft_size],
            smoothed: vec![0.0; bins],
            smoothing: smoothing.clamp(0.0, 0.999),
            spectrum_db: vec![DB_FLOOR; bins],
        }
    }

    pub fn fft_size(&self) -> usize {
        self.window.len()
    }

    pub fn bins(&self) -> usize {
        self.spectrum_db.len()
    }

    /// Analyse one window of samples and return the updated spectrum.
    ///
    /// A buffer shorter than `fft_size` is zero-padded; extra samples are
    /// ignored.
    pub fn process(&mut self, samples: &[f32]) -> &[f32] {
        for (i, slot) in self.scratch.iter_mut().enumerate() {
            let sample = samples.get(i).copied().unwrap_or(0.0);
            *slot = Complex::new(sample * self.window[i], 0.0);
        }

        self.fft.process(&mut self.scratch);

        let norm = 1.0 / self.window.len() as f32;
        let tau = self.smoothing;
        for ((bin, smoothed), db) in self
            .scratch
            .iter()
            .zip(self.smoothed.iter_mut())
            .zip(self.spectrum_db.iter_mut())
        {
            let magnitude = bin.norm() * norm;
            *smoothed = tau * *smoothed + (1.0 - tau) * magnitude;
            let power = (*smoothed * *smoothed).max(POWER_FLOOR);
            *db = 10.0 * power.log10();
        }

        &self.spectrum_db
    }

    /// Most recent spectrum in dB
    pub fn spectrum_db(&self) -> &[f32] {
        &self.spectrum_db
    }

    /// Forget smoothing history
    pub fn reset(&mut self) {
        self.smoothed.fill(0.0);
        self.spectrum_db.fill(DB_FLOOR);
    }
}

fn blackman(len: usize) -> Vec<f32> {
    use std::f32::consts::PI;

    (0..len)
        .map(|i| {
            let phase = 2.0 * PI * i as f32 / len as f32;
            0.42 - 0.5 * phase.cos() + 0.08 * (2.0 * phase).cos()
        })
        .collect()
}
