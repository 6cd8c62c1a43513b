//! Exponential parameter smoothing.

/*
Smoothed Parameter Ramps
========================

Moving a filter knob should never make the coefficients jump: an instant
change of cutoff or Q injects a step into the filter state, which is heard as
a click and seen as a spike in the scope. Instead the parameter approaches its
new target exponentially, starting at a given point on the continuous clock:

    v(t) = target + (v(t0) - target) × e^(-(t - t0) / τ)        for t ≥ t0
    v(t) = v(t0)                                                 for t < t0

τ (the time constant) is the time it takes to cover ~63% of the distance.
After 3τ the parameter is within 5% of the target, after 5τ within 1%. The lab
uses τ = 50 ms: fast enough to feel immediate, slow enough to be transient free.

Per sample this becomes a one-pole lowpass on the parameter value:

    coeff = e^(-1 / (τ × sample_rate))
    v[n]  = target + (v[n-1] - target) × coeff

Once the remaining distance is negligible the value snaps to the target so a
settled parameter costs nothing and compares equal to what was asked for.
*/

/// Time constant used by the filter stage for cutoff and Q (seconds)
pub const DEFAULT_TIME_CONSTANT: f32 = 0.05;

const SETTLE_RATIO: f32 = 1e-5;

#[derive(Debug, Clone)]
pub struct SmoothedParam {
    current: f32,
    target: f32,
    start_time: f64,
    time_constant: f32,
    cached_rate: f32,
    coeff: f32,
}

impl SmoothedParam {
    pub fn new(value: f32) -> Self {
        Self {
            current: value,
            target: value,
            start_time: 0.0,
            time_constant: DEFAULT_TIME_CONSTANT,
            cached_rate: 0.0,
            coeff: 0.0,
        }
    }

    /// Begin an exponential approach to `target` at `start_time` seconds.
    ///
    /// A zero time constant jumps straight to the target once `start_time`
    /// is reached.
    pub fn set_target_at_time(&mut self, target: f32, start_time: f64, time_constant: f32) {
        self.target = target;
        self.start_time = start_time;
        if time_constant != self.time_constant {
            self.time_constant = time_constant.max(0.0);
            self.cached_rate = 0.0;
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    /// Advance one sample. `time` is the continuous time of that sample.
    #[inline]
    pub fn next(&mut self, time: f64, sample_rate: f32) -> f32 {
        if self.is_settled() || time < self.start_time {
            return self.current;
        }

        if self.time_constant <= 0.0 {
            self.current = self.target;
            return self.current;
        }

        if self.cached_rate != sample_rate {
            self.coeff = (-1.0 / (self.time_constant * sample_rate)).exp();
            self.cached_rate = sample_rate;
        }

        self.current = self.target + (self.current - self.target) * self.coeff;

        let tolerance = SETTLE_RATIO * self.target.abs().max(1.0);
        if (self.current - self.target).abs() <= tolerance {
            self.current = self.target;
        }

        self.current
    }
}
