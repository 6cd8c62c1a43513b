use crate::{
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/// Multiply a signal by a gain signal, sample by sample.
///
/// With an [`AmEnvelope`](crate::graph::modulate::AmEnvelope) as the gain this
/// is double-sideband amplitude modulation.
pub struct Amplify<N, M> {
    pub signal: N,
    pub gain: M,
    gain_buffer: Vec<f32>,
}

impl<N, M> Amplify<N, M> {
    pub fn new(signal: N, gain: M) -> Self {
        Self {
            signal,
            gain,
            gain_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<N: GraphNode, M: GraphNode> GraphNode for Amplify<N, M> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.signal.render_block(out, ctx);

        // Blocks never exceed MAX_BLOCK_SIZE, so slicing does not allocate
        let gain = &mut self.gain_buffer[..out.len()];
        gain.fill(0.0);
        self.gain.render_block(gain, ctx);

        for (o, g) in out.iter_mut().zip(gain.iter()) {
            *o *= *g;
        }
    }
}
