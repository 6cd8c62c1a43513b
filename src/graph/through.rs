use crate::graph::node::{GraphNode, RenderCtx};

/*
Serial Signal Chain (Through)
=============================

Through connects two nodes in series: the source renders into the buffer,
then the effect processes that buffer in place.

  Source renders:   [0.5, 0.8, -0.3, 0.9, ...]
  Effect in place:  [0.4, 0.6, -0.2, 0.7, ...]

In the lab the main chain is split by the observation taps, so the pipeline
drives the filter stage directly; Through is the shorthand for offline
chains such as benchmarks and tests:

  let filtered = OscNode::square(440.0)
      .through(FilterStage::new(&FilterConfiguration::default()));
*/

pub struct Through<S, E> {
    pub source: S,
    pub effect: E,
}

impl<S, E> Through<S, E> {
    pub fn new(source: S, effect: E) -> Self {
        Self { source, effect }
    }
}

impl<S: GraphNode, E: GraphNode> GraphNode for Through<S, E> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source.render_block(out, ctx);
        self.effect.render_block(out, ctx);
    }
}
