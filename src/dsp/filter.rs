use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::smoothing::SmoothedParam;
use crate::graph::node::RenderCtx;
use crate::model::FilterKind;

/*
| type              | passes          | rejects      | output tap            |
| ----------------- | --------------- | ------------ | --------------------- |
| low-pass          | below cutoff    | above cutoff | v2                    |
| high-pass         | above cutoff    | below cutoff | x - k·v1 - v2         |
| band-pass         | around cutoff   | outside      | k·v1 (0 dB peak)      |
| notch / band-stop | outside         | at cutoff    | x - k·v1              |

k = 1/Q. The band-pass tap is scaled by k so its peak gain is unity for any Q,
matching the other responses' pass-band level.
*/

/// Highest cutoff as a fraction of the sample rate; tan() diverges at Nyquist
const MAX_CUTOFF_RATIO: f32 = 0.49;
const MIN_Q: f32 = 0.01;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    LowPass,
    HighPass,
    BandPass,
    Notch,
}

impl From<FilterKind> for FilterType {
    fn from(kind: FilterKind) -> Self {
        match kind {
            FilterKind::LowPass => FilterType::LowPass,
            FilterKind::HighPass => FilterType::HighPass,
            FilterKind::BandPass => FilterType::BandPass,
            FilterKind::BandStop => FilterType::Notch,
        }
    }
}

pub struct FilterOutputs {
    pub lowpass: f32,
    pub bandpass: f32,
    pub highpass: f32,
    pub notch: f32,
}

pub struct SVFilter {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory

    cutoff_hz: SmoothedParam,
    q: SmoothedParam,
    filter_type: FilterType,
}

impl SVFilter {
    pub fn new(filter_type: FilterType, cutoff_hz: f32, q: f32) -> Self {
        Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            cutoff_hz: SmoothedParam::new(cutoff_hz),
            q: SmoothedParam::new(q),
            filter_type,
        }
    }

    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::LowPass, cutoff_hz, std::f32::consts::FRAC_1_SQRT_2)
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::HighPass, cutoff_hz, std::f32::consts::FRAC_1_SQRT_2)
    }

    #[inline]
    fn compute_g(cutoff_hz: f32, sample_rate: f32) -> f32 {
        let cutoff = cutoff_hz.clamp(1.0, sample_rate * MAX_CUTOFF_RATIO);
        let wd = TAU * cutoff;
        let wa = (2.0 * sample_rate) * (wd / (2.0 * sample_rate)).tan();
        wa / (2.0 * sample_rate)
    }

    #[inline]
    fn compute_k(q: f32) -> f32 {
        1.0 / q.max(MIN_Q)
    }

    fn next_sample(&mut self, sample: f32, k: f32, g: f32) -> FilterOutputs {
        let h = 1.0 / (1.0 + g * (g + k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        FilterOutputs {
            lowpass: v2,
            bandpass: k * v1,
            highpass: sample - k * v1 - v2,
            notch: sample - k * v1,
        }
    }

    #[inline]
    fn select(&self, outputs: FilterOutputs) -> f32 {
        match self.filter_type {
            FilterType::LowPass => outputs.lowpass,
            FilterType::HighPass => outputs.highpass,
            FilterType::BandPass => outputs.bandpass,
            FilterType::Notch => outputs.notch,
        }
    }

    pub fn render(&mut self, buffer: &mut [f32], ctx: &RenderCtx) {
        let sample_rate = ctx.sample_rate;

        if self.cutoff_hz.is_settled() && self.q.is_settled() {
            let g = Self::compute_g(self.cutoff_hz.current(), sample_rate);
            let k = Self::compute_k(self.q.current());
            for sample in buffer.iter_mut() {
                let outputs = self.next_sample(*sample, k, g);
                *sample = self.select(outputs);
            }
            return;
        }

        // Ramping: coefficients follow the smoothed parameters sample by sample
        let dt = 1.0 / sample_rate as f64;
        for (n, sample) in buffer.iter_mut().enumerate() {
            let time = ctx.time + n as f64 * dt;
            let g = Self::compute_g(self.cutoff_hz.next(time, sample_rate), sample_rate);
            let k = Self::compute_k(self.q.next(time, sample_rate));
            let outputs = self.next_sample(*sample, k, g);
            *sample = self.select(outputs);
        }
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }

    /// Move cutoff and Q toward new targets, starting at `start_time` seconds.
    pub fn retarget(&mut self, cutoff_hz: f32, q: f32, start_time: f64, time_constant: f32) {
        self.cutoff_hz
            .set_target_at_time(cutoff_hz, start_time, time_constant);
        self.q.set_target_at_time(q, start_time, time_constant);
    }

    pub fn set_filter_type(&mut self, filter_type: FilterType) {
        self.filter_type = filter_type;
    }

    /// Cutoff currently in effect (mid-ramp values included)
    pub fn cutoff_hz(&self) -> f32 {
        self.cutoff_hz.current()
    }

    pub fn q(&self) -> f32 {
        self.q.current()
    }

    pub fn target_cutoff_hz(&self) -> f32 {
        self.cutoff_hz.target()
    }
}
