use crate::dsp::noise::NoiseLoop;
use crate::graph::node::{GraphNode, RenderCtx};

/// White noise from a pre-generated loop (see `dsp/noise.rs`).
///
/// The loop is generated for a specific sample rate; build a new node when
/// the rate changes.
pub struct NoiseNode {
    noise: NoiseLoop,
}

impl NoiseNode {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            noise: NoiseLoop::new(sample_rate),
        }
    }

    pub fn from_loop(noise: NoiseLoop) -> Self {
        Self { noise }
    }
}

impl GraphNode for NoiseNode {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        self.noise.render(out);
    }
}
