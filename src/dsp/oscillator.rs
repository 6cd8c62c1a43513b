use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Phase-Accumulator Oscillator
============================

Every periodic generator in the lab is the same machine: a phase value that
walks from 0.0 to 1.0 once per cycle, and a shaping function that turns that
phase into an amplitude.

    phase[n+1] = fract(phase[n] + frequency / sample_rate)
    sample[n]  = shape(phase[n])

Because the frequency is read every sample, the same oscillator serves as a
plain carrier (constant frequency) and as an FM carrier (a per-sample
frequency buffer driven by a modulator). Phase stays continuous when the
frequency changes, so frequency modulation never clicks.

Shapes
------

    phase     0.0    0.25    0.5    0.75    1.0
    sine      0      +1      0      -1      0
    square    +1     +1      -1     -1      +1
    triangle  0      +1      0      -1      0

All three start at (or jump from) zero phase, so a freshly built oscillator
produces sin(2π f n / sr) exactly for the sine shape.

The square and triangle are naive (not band-limited). Above a few kHz the
square aliases; that is visible in the spectrum view and is left in on
purpose as something the filter can be pointed at.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OscillatorWaveform {
    Sine,
    Square,
    Triangle,
}

impl OscillatorWaveform {
    /// Evaluate the waveform at a phase in [0.0, 1.0).
    #[inline]
    pub fn shape(self, phase: f32) -> f32 {
        match self {
            OscillatorWaveform::Sine => (TAU * phase).sin(),
            OscillatorWaveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            OscillatorWaveform::Triangle => {
                if phase < 0.25 {
                    4.0 * phase
                } else if phase < 0.75 {
                    2.0 - 4.0 * phase
                } else {
                    4.0 * phase - 4.0
                }
            }
        }
    }
}

pub struct OscillatorBlock {
    waveform: OscillatorWaveform,
    phase: f32,
}

impl OscillatorBlock {
    pub fn new(waveform: OscillatorWaveform) -> Self {
        Self {
            waveform,
            phase: 0.0,
        }
    }

    pub fn sine() -> Self {
        Self::new(OscillatorWaveform::Sine)
    }

    pub fn square() -> Self {
        Self::new(OscillatorWaveform::Square)
    }

    pub fn triangle() -> Self {
        Self::new(OscillatorWaveform::Triangle)
    }

    pub fn waveform(&self) -> OscillatorWaveform {
        self.waveform
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    #[inline]
    pub fn next_sample(&mut self, frequency: f32, sample_rate: f32) -> f32 {
        let sample = self.waveform.shape(self.phase);
        self.phase += frequency / sample_rate;
        self.phase -= self.phase.floor();
        sample
    }

    /// Fill `destination` at a constant frequency.
    pub fn render(&mut self, destination: &mut [f32], frequency: f32, sample_rate: f32) {
        for sample in destination.iter_mut() {
            *sample = self.next_sample(frequency, sample_rate);
        }
    }

    /// Fill `destination` reading one instantaneous frequency per sample.
    ///
    /// `frequencies` must be at least as long as `destination`.
    pub fn render_modulated(
        &mut self,
        destination: &mut [f32],
        frequencies: &[f32],
        sample_rate: f32,
    ) {
        for (sample, &frequency) in destination.iter_mut().zip(frequencies.iter()) {
            *sample = self.next_sample(frequency, sample_rate);
        }
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}
