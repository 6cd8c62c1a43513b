use crate::graph::node::{GraphNode, RenderCtx};
use crate::model::SignalModel;

/// What the current source is doing, for the link statistics display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStatus {
    /// Generators are running
    Active,
    /// An external source (live input) was requested but is not available;
    /// the pipeline carries silence instead
    Unavailable,
    /// Nothing is configured
    Stopped,
}

impl SourceStatus {
    pub fn label(self) -> &'static str {
        match self {
            SourceStatus::Active => "SYNCHRONIZED",
            SourceStatus::Unavailable => "NO INPUT",
            SourceStatus::Stopped => "STANDBY",
        }
    }
}

/// The generators built for one [`SignalModel`].
///
/// Owning the handle owns every generator behind it; dropping it releases
/// them. There is no way to reach the generators except through the handle,
/// so two models can never play at once.
pub struct SynthesisHandle {
    model: SignalModel,
    status: SourceStatus,
    graph: Box<dyn GraphNode>,
}

impl SynthesisHandle {
    pub(crate) fn new(model: SignalModel, status: SourceStatus, graph: Box<dyn GraphNode>) -> Self {
        Self {
            model,
            status,
            graph,
        }
    }

    pub fn model(&self) -> &SignalModel {
        &self.model
    }

    pub fn status(&self) -> SourceStatus {
        self.status
    }

    /// Amplitude only scales the monitor output, so the generators stay as
    /// they are.
    pub(crate) fn set_amplitude(&mut self, amplitude: f32) {
        self.model.amplitude = amplitude.clamp(0.0, 1.0);
    }

    /// Overwrite `out` with the next block of the source signal.
    pub fn render(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.graph.render_block(out, ctx);
    }
}

impl std::fmt::Debug for SynthesisHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SynthesisHandle")
            .field("model", &self.model)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}
