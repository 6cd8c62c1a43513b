//! Looped white-noise buffer.

use rand::Rng;

/// Length of the noise loop in seconds
pub const NOISE_LOOP_SECONDS: f32 = 2.0;

/// A fixed buffer of uniform white noise in [-1.0, 1.0], played as a loop.
///
/// The buffer is filled once at construction; playback wraps from the last
/// sample straight to the first, so the loop has no gap or fade.
pub struct NoiseLoop {
    buffer: Vec<f32>,
    position: usize,
}

impl NoiseLoop {
    /// Generate `NOISE_LOOP_SECONDS` of noise at `sample_rate`.
    pub fn new(sample_rate: f32) -> Self {
        Self::with_rng(sample_rate, &mut rand::thread_rng())
    }

    /// Same as [`NoiseLoop::new`] with a caller-supplied generator (seeded in tests).
    pub fn with_rng<R: Rng + ?Sized>(sample_rate: f32, rng: &mut R) -> Self {
        let len = ((sample_rate * NOISE_LOOP_SECONDS) as usize).max(1);
        let buffer = (0..len).map(|_| rng.gen_range(-1.0f32..=1.0)).collect();
        Self {
            buffer,
            position: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn render(&mut self, destination: &mut [f32]) {
        for sample in destination.iter_mut() {
            *sample = self.buffer[self.position];
            self.position += 1;
            if self.position == self.buffer.len() {
                self.position = 0;
            }
        }
    }
}
