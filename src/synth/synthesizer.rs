use tracing::{debug, info, warn};

use crate::graph::{
    extensions::NodeExt,
    live::{LiveFeed, LiveInputNode},
    mix::WeightedSum,
    modulate::{AmEnvelope, FrequencyModulated},
    node::{GraphNode, RenderCtx},
    noise::NoiseNode,
    oscillator::OscNode,
};
use crate::model::{SignalKind, SignalModel};
use crate::synth::handle::{SourceStatus, SynthesisHandle};

/// Partials of the composite test tone as (frequency ratio, weight).
///
/// Weights follow 0.3 / (i + 1), so the sum peaks at 0.55.
pub const COMPOSITE_PARTIALS: [(f32, f32); 3] = [(1.0, 0.3), (2.0, 0.15), (3.5, 0.1)];

/// Builds generators for a [`SignalModel`] without touching anything that is
/// playing.
///
/// Building can be slow (the noise loop fills about two seconds of samples),
/// so the controller builds on its own thread and only hands the finished
/// [`SynthesisHandle`] to the audio path.
#[derive(Clone)]
pub struct SourceFactory {
    sample_rate: f32,
    live_feed: Option<LiveFeed>,
}

impl SourceFactory {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            live_feed: None,
        }
    }

    /// Attach a live capture feed for [`SignalKind::LiveInput`].
    pub fn with_live_feed(mut self, feed: LiveFeed) -> Self {
        self.live_feed = Some(feed);
        self
    }

    pub fn set_live_feed(&mut self, feed: LiveFeed) {
        self.live_feed = Some(feed);
    }

    pub fn has_live_feed(&self) -> bool {
        self.live_feed.is_some()
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Clamp `model` and build its generators.
    pub fn build(&self, model: &SignalModel) -> SynthesisHandle {
        let model = model.clamped();
        let (graph, status) = build_source(&model, self.sample_rate, self.live_feed.as_ref());

        match status {
            SourceStatus::Unavailable => {
                warn!(kind = model.kind.label(), "live input unavailable, carrying silence")
            }
            _ => info!(
                kind = model.kind.label(),
                carrier_hz = model.carrier_frequency_hz,
                modulator_hz = model.modulator_frequency_hz,
                depth = model.modulation_depth,
                "source configured"
            ),
        }

        SynthesisHandle::new(model, status, graph)
    }
}

/// Owns the generators for the current signal model.
///
/// At most one [`SynthesisHandle`] exists at a time: installing a new one
/// tears the previous one down first.
pub struct Synthesizer {
    factory: SourceFactory,
    active: Option<SynthesisHandle>,
}

impl Synthesizer {
    pub fn new(sample_rate: f32) -> Self {
        Self::with_factory(SourceFactory::new(sample_rate))
    }

    pub fn with_factory(factory: SourceFactory) -> Self {
        Self {
            factory,
            active: None,
        }
    }

    /// Attach a live capture feed for [`SignalKind::LiveInput`].
    pub fn with_live_feed(mut self, feed: LiveFeed) -> Self {
        self.factory.set_live_feed(feed);
        self
    }

    /// Attach a capture feed after construction. Takes effect the next time a
    /// live input source is built.
    pub fn set_live_feed(&mut self, feed: LiveFeed) {
        self.factory.set_live_feed(feed);
    }

    pub fn has_live_feed(&self) -> bool {
        self.factory.has_live_feed()
    }

    pub fn sample_rate(&self) -> f32 {
        self.factory.sample_rate()
    }

    pub fn factory(&self) -> &SourceFactory {
        &self.factory
    }

    /// Replace whatever is playing with generators for `model`.
    pub fn configure(&mut self, model: &SignalModel) -> &SynthesisHandle {
        let handle = self.factory.build(model);
        self.install(handle)
    }

    /// Replace whatever is playing with generators built elsewhere.
    pub fn install(&mut self, handle: SynthesisHandle) -> &SynthesisHandle {
        self.stop();
        self.active.insert(handle)
    }

    /// Change the amplitude of the active source without rebuilding it.
    ///
    /// Returns `false` when nothing is playing.
    pub fn set_amplitude(&mut self, amplitude: f32) -> bool {
        match &mut self.active {
            Some(handle) => {
                handle.set_amplitude(amplitude);
                true
            }
            None => false,
        }
    }

    /// Tear down the active generators, if any.
    pub fn stop(&mut self) {
        if let Some(handle) = self.active.take() {
            debug!(kind = handle.model().kind.label(), "source torn down");
        }
    }

    pub fn active(&self) -> Option<&SynthesisHandle> {
        self.active.as_ref()
    }

    pub fn status(&self) -> SourceStatus {
        self.active
            .as_ref()
            .map_or(SourceStatus::Stopped, SynthesisHandle::status)
    }
}

impl GraphNode for Synthesizer {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        match &mut self.active {
            Some(handle) => handle.render(out, ctx),
            None => out.fill(0.0),
        }
    }
}

fn build_source(
    model: &SignalModel,
    sample_rate: f32,
    live_feed: Option<&LiveFeed>,
) -> (Box<dyn GraphNode>, SourceStatus) {
    let carrier = model.carrier_frequency_hz;
    let modulator = model.modulator_frequency_hz;
    let depth = model.modulation_depth;

    let graph: Box<dyn GraphNode> = match model.kind {
        SignalKind::Sine => Box::new(OscNode::sine(carrier)),
        SignalKind::Square => Box::new(OscNode::square(carrier)),
        SignalKind::Triangle => Box::new(OscNode::triangle(carrier)),
        SignalKind::Composite => Box::new(
            COMPOSITE_PARTIALS
                .iter()
                .fold(WeightedSum::new(), |sum, &(ratio, weight)| {
                    sum.with(OscNode::sine(carrier * ratio), weight)
                }),
        ),
        // The modulator only drives the gain of the carrier
        SignalKind::AmplitudeModulated => Box::new(
            OscNode::sine(carrier).amplify(AmEnvelope::new(OscNode::sine(modulator), depth)),
        ),
        SignalKind::FrequencyModulated => Box::new(FrequencyModulated::new(
            OscNode::sine(modulator),
            carrier,
            depth,
        )),
        SignalKind::Noise => Box::new(NoiseNode::new(sample_rate)),
        SignalKind::LiveInput => {
            let node = LiveInputNode::new(live_feed.cloned());
            let status = if node.is_connected() {
                SourceStatus::Active
            } else {
                SourceStatus::Unavailable
            };
            return (Box::new(node), status);
        }
    };

    (graph, SourceStatus::Active)
}
