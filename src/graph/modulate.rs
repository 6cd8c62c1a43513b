use crate::{
    dsp::{
        modulate::{am_envelope, fm_frequency},
        oscillator::{OscillatorBlock, OscillatorWaveform},
    },
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/*
Modulation Nodes
================

Two ways of letting a modulator drive a carrier, both at sample rate.

AM: AmEnvelope turns a bipolar modulator into a gain signal that stays within
[1 - depth, 1]; multiplying a carrier by it (`.amplify()`) gives standard
double-sideband AM.

  let am = OscNode::sine(1000.0)
      .amplify(AmEnvelope::new(OscNode::sine(20.0), 0.5));

FM: FrequencyModulated owns the carrier oscillator and feeds it one
instantaneous frequency per sample, fc + depth·fc·m(t).

  let fm = FrequencyModulated::new(OscNode::sine(20.0), 1000.0, 0.3);

A modulator only ever drives one connection. The carrier of an AM signal keeps
a fixed frequency, and the carrier of an FM signal keeps a fixed amplitude.

See `dsp/modulate.rs` for the math.
*/

/// Gain signal for amplitude modulation, in `[1 - depth, 1]`.
pub struct AmEnvelope<M> {
    modulator: M,
    depth: f32,
}

impl<M> AmEnvelope<M> {
    pub fn new(modulator: M, depth: f32) -> Self {
        Self {
            modulator,
            depth: depth.clamp(0.0, 1.0),
        }
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }
}

impl<M: GraphNode> GraphNode for AmEnvelope<M> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.modulator.render_block(out, ctx);
        for sample in out.iter_mut() {
            *sample = am_envelope(*sample, self.depth);
        }
    }
}

/// Carrier oscillator whose frequency is driven by a modulator.
pub struct FrequencyModulated<M> {
    carrier: OscillatorBlock,
    carrier_hz: f32,
    depth: f32,
    modulator: M,
    frequencies: Vec<f32>,
    last_len: usize,
}

impl<M> FrequencyModulated<M> {
    /// Sine carrier at `carrier_hz` with peak deviation `depth × carrier_hz`.
    pub fn new(modulator: M, carrier_hz: f32, depth: f32) -> Self {
        Self {
            carrier: OscillatorBlock::new(OscillatorWaveform::Sine),
            carrier_hz,
            depth: depth.clamp(0.0, 1.0),
            modulator,
            frequencies: vec![0.0; MAX_BLOCK_SIZE],
            last_len: 0,
        }
    }

    /// Peak frequency deviation in Hz
    pub fn deviation_hz(&self) -> f32 {
        self.depth * self.carrier_hz
    }

    /// Instantaneous carrier frequencies used for the most recent block
    pub fn last_frequencies(&self) -> &[f32] {
        &self.frequencies[..self.last_len]
    }
}

impl<M: GraphNode> GraphNode for FrequencyModulated<M> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let len = out.len();
        let frequencies = &mut self.frequencies[..len];

        // Modulator output in [-1.0, +1.0], then mapped to Hz in place
        self.modulator.render_block(frequencies, ctx);
        for f in frequencies.iter_mut() {
            *f = fm_frequency(self.carrier_hz, *f, self.depth);
        }

        self.carrier
            .render_modulated(out, frequencies, ctx.sample_rate);
        self.last_len = len;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{amplify::Amplify, oscillator::OscNode};

    #[test]
    fn test_am_envelope_node_range() {
        let ctx = RenderCtx::new(48_000.0);
        for &depth in &[0.0, 0.3, 0.5, 1.0] {
            let mut env = AmEnvelope::new(OscNode::sine(20.0), depth);
            let mut buffer = vec![0.0; 2048];
            for _ in 0..3 {
                env.render_block(&mut buffer, &ctx);
                for &g in &buffer {
                    assert!(
                        g >= 1.0 - depth - 1e-5 && g <= 1.0 + 1e-5,
                        "depth {} produced gain {}",
                        depth,
                        g
                    );
                }
            }
        }
    }

    #[test]
    fn test_am_signal_envelope_reaches_both_bounds() {
        // 1 kHz carrier, 20 Hz modulator: one modulator period = 2400 samples
        let ctx = RenderCtx::new(48_000.0);
        let depth = 0.6;
        let mut am = Amplify::new(
            OscNode::sine(1_000.0),
            AmEnvelope::new(OscNode::sine(20.0), depth),
        );

        let mut buffer = vec![0.0; 2048];
        let mut all = Vec::new();
        for _ in 0..2 {
            am.render_block(&mut buffer, &ctx);
            all.extend_from_slice(&buffer);
        }

        let peak = all.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        assert!(peak <= 1.0 + 1e-5);
        assert!(peak > 0.95, "expected envelope to reach 1, peak {}", peak);

        // Around the modulator trough (3/4 period = sample 1800) the carrier is pinched
        let trough = all[1750..1850]
            .iter()
            .fold(0.0f32, |acc, &x| acc.max(x.abs()));
        assert!(
            (trough - (1.0 - depth)).abs() < 0.05,
            "expected trough envelope near {}, got {}",
            1.0 - depth,
            trough
        );
    }

    #[test]
    fn test_fm_deviation_bounded() {
        let ctx = RenderCtx::new(44_100.0);
        let carrier = 1_000.0;
        let depth = 0.4;
        let mut fm = FrequencyModulated::new(OscNode::sine(50.0), carrier, depth);
        assert!((fm.deviation_hz() - 400.0).abs() < 1e-3);

        let mut buffer = vec![0.0; 2048];
        let mut max_dev = 0.0f32;
        for _ in 0..4 {
            fm.render_block(&mut buffer, &ctx);
            for &f in fm.last_frequencies() {
                let dev = (f - carrier).abs();
                assert!(dev <= depth * carrier + 1e-3, "deviation {} too large", dev);
                max_dev = max_dev.max(dev);
            }
        }
        // 4 blocks cover several modulator cycles, so the peak is reached
        assert!(max_dev > depth * carrier * 0.99);
        assert!(buffer.iter().all(|s| (-1.0..=1.0).contains(s)));
    }

    #[test]
    fn test_fm_zero_depth_is_plain_carrier() {
        let ctx = RenderCtx::new(48_000.0);
        let mut fm = FrequencyModulated::new(OscNode::sine(30.0), 440.0, 0.0);
        let mut plain = OscNode::sine(440.0);

        let mut a = vec![0.0; 512];
        let mut b = vec![0.0; 512];
        fm.render_block(&mut a, &ctx);
        plain.render_block(&mut b, &ctx);

        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-5);
        }
    }
}
