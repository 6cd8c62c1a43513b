use crate::{
    dsp::{
        filter::{FilterType, SVFilter},
        smoothing::DEFAULT_TIME_CONSTANT,
    },
    graph::node::{GraphNode, RenderCtx},
    model::FilterConfiguration,
};

/*
Filter Stage
============

The one second-order filter of the lab, configured by a plain
FilterConfiguration. Every configuration change goes through `apply`, which
never jumps: cutoff and Q glide toward their new values with a 50 ms time
constant, anchored at the continuous time the change was made. Turning a
knob therefore produces a short sweep instead of a click or a spike in the
scope.

    config change at t0        cutoff
                                 ▲        ┌──────── target
                                 │      ╱
                                 │    ╱
                                 │  ╱
                                 │╱
                                 └──────────────────▶ t
                                 t0  +τ  +3τ

The filter kind switches immediately (there is nothing to interpolate
between two responses), and BandStop is realized as the SVF notch output.

Range checking is the caller's job. The coefficient math itself keeps the
cutoff just below Nyquist, so even a boundary value renders finite samples.
*/

pub struct FilterStage {
    filter: SVFilter,
    config: FilterConfiguration,
    time_constant: f32,
}

impl FilterStage {
    /// Build a stage already settled at `config` (no initial ramp).
    pub fn new(config: &FilterConfiguration) -> Self {
        Self {
            filter: SVFilter::new(config.kind.into(), config.cutoff_hz, config.q_factor),
            config: *config,
            time_constant: DEFAULT_TIME_CONSTANT,
        }
    }

    pub fn with_time_constant(mut self, seconds: f32) -> Self {
        self.time_constant = seconds;
        self
    }

    /// Re-target the stage at `continuous_time` seconds.
    pub fn apply(&mut self, config: &FilterConfiguration, continuous_time: f64) {
        self.filter.set_filter_type(FilterType::from(config.kind));
        self.filter.retarget(
            config.cutoff_hz,
            config.q_factor,
            continuous_time,
            self.time_constant,
        );
        self.config = *config;
    }

    /// Configuration most recently applied
    pub fn config(&self) -> &FilterConfiguration {
        &self.config
    }

    /// Cutoff currently in effect, including any ramp in progress
    pub fn effective_cutoff_hz(&self) -> f32 {
        self.filter.cutoff_hz()
    }

    pub fn effective_q(&self) -> f32 {
        self.filter.q()
    }

    pub fn reset(&mut self) {
        self.filter.reset();
    }
}

impl GraphNode for FilterStage {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.filter.render(out, ctx);
    }
}
