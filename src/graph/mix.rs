use crate::graph::node::{GraphNode, RenderCtx};
use crate::MAX_BLOCK_SIZE;

/*
Weighted Summing
================

A weighted sum adds any number of sources, each scaled by its own weight:

    output = Σ source_i × weight_i

Unlike a crossfade the weights do not have to add up to 1.0. The peak of the
sum can never exceed Σ |weight_i| when every source stays in [-1, 1], which
makes the headroom of a composite signal easy to reason about.

Example usage:
  // Harmonically rich test tone with a non-integer partial
  let composite = WeightedSum::new()
      .with(OscNode::sine(440.0), 0.3)
      .with(OscNode::sine(880.0), 0.15)
      .with(OscNode::sine(1540.0), 0.1);
*/

pub struct WeightedSum {
    sources: Vec<(Box<dyn GraphNode>, f32)>,
    temp_buffer: Vec<f32>,
}

impl WeightedSum {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    pub fn with<N: GraphNode + 'static>(mut self, source: N, weight: f32) -> Self {
        self.sources.push((Box::new(source), weight));
        self
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn weights(&self) -> impl Iterator<Item = f32> + '_ {
        self.sources.iter().map(|(_, w)| *w)
    }

    /// Largest possible output magnitude for sources bounded by ±1
    pub fn headroom(&self) -> f32 {
        self.weights().map(f32::abs).sum()
    }
}

impl Default for WeightedSum {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphNode for WeightedSum {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        out.fill(0.0);

        let frames = &mut self.temp_buffer[..out.len()];
        for (source, weight) in self.sources.iter_mut() {
            frames.fill(0.0);
            source.render_block(frames, ctx);
            for (o, s) in out.iter_mut().zip(frames.iter()) {
                *o += *s * *weight;
            }
        }
    }
}
