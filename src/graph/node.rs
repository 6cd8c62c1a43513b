/// Context passed to graph nodes during rendering
///
/// - sample_rate: Audio sample rate (e.g., 48000.0)
/// - time: Continuous time of the first sample in the block, in seconds
#[derive(Debug, Clone, Copy)]
pub struct RenderCtx {
    pub sample_rate: f32,
    pub time: f64,
}

impl RenderCtx {
    /// Context at the start of the clock
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            time: 0.0,
        }
    }

    pub fn at_time(self, time: f64) -> Self {
        Self { time, ..self }
    }

    /// Duration of `frames` samples in seconds
    pub fn duration_of(&self, frames: usize) -> f64 {
        frames as f64 / self.sample_rate as f64
    }
}

/// Core trait for audio processing graph nodes
///
/// A node either generates samples (oscillators, noise, live input) and
/// overwrites `out`, or processes `out` in place (filters).
pub trait GraphNode: Send {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx);
}

/// Allow boxed graph nodes to be used as graph nodes (for dynamic dispatch)
impl GraphNode for Box<dyn GraphNode> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        (**self).render_block(out, ctx)
    }
}
