use crate::dsp::oscillator::{OscillatorBlock, OscillatorWaveform};
use crate::graph::node::{GraphNode, RenderCtx};

/*
Periodic Generators
===================

The basic test signals of a filter lab. Each has a known harmonic recipe, so
what the filter removes is easy to read off the spectrum view:

Sine: A single frequency with no harmonics.
  - The reference: a filter can only scale and delay it.
  - Below cutoff a lowpass leaves it alone, above cutoff it shrinks.

Square: Odd harmonics only (1st, 3rd, 5th, 7th, ...), amplitude 1/n.
  - Rich enough that a lowpass visibly rounds the edges.
  - Filtering away the upper harmonics exposes ringing near the edges
    (the Gibbs phenomenon), stronger at high Q.

Triangle: Odd harmonics only, amplitude 1/n².
  - Much quieter overtones than the square; looks almost like a sine after
    gentle lowpass filtering.

Example usage:
  let tone = OscNode::sine(440.0);
  let buzz = OscNode::square(220.0);
  let soft = OscNode::triangle(880.0);

  // Carrier for AM: multiply by an envelope node
  let am = OscNode::sine(1000.0).amplify(AmEnvelope::new(OscNode::sine(20.0), 0.5));
*/

pub struct OscNode {
    osc: OscillatorBlock,
    frequency: f32,
}

impl OscNode {
    pub fn new(waveform: OscillatorWaveform, frequency: f32) -> Self {
        Self {
            osc: OscillatorBlock::new(waveform),
            frequency,
        }
    }

    pub fn sine(frequency: f32) -> Self {
        Self::new(OscillatorWaveform::Sine, frequency)
    }

    pub fn square(frequency: f32) -> Self {
        Self::new(OscillatorWaveform::Square, frequency)
    }

    pub fn triangle(frequency: f32) -> Self {
        Self::new(OscillatorWaveform::Triangle, frequency)
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn waveform(&self) -> OscillatorWaveform {
        self.osc.waveform()
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.osc.render(out, self.frequency, ctx.sample_rate);
    }
}
