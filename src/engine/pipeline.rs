use std::sync::Arc;

use crate::{
    engine::shared::SharedState,
    graph::{filter::FilterStage, live::LiveFeed, node::GraphNode, RenderCtx},
    model::{FilterConfiguration, SignalModel},
    observe::ObservationTap,
    synth::{SourceStatus, SynthesisHandle, Synthesizer},
    MAX_BLOCK_SIZE,
};

/*
Render Pipeline
===============

Everything the audio callback does, in signal-flow order:

    Synthesizer ──▶ raw ──┬──────────────────────────▶ tap.raw
                          │
                          └─▶ FilterStage ──▶ filtered ──┬──▶ tap.filtered
                                                         │
                                                         └─▶ × gain ──▶ out

    gain = monitor_gain × amplitude

The tap receives raw and filtered samples as pairs, so both observation
points are always captured from the same instants. The monitor gain only
affects what is heard.

The pipeline keeps a sample clock that advances on every block, running or
not. Filter changes published through the shared state are picked up at the
start of the next block and anchored at the clock time of that block.
*/

pub struct Pipeline {
    synth: Synthesizer,
    filter: FilterStage,
    /// Configuration the filter stage was last re-targeted with
    applied_filter: Arc<FilterConfiguration>,
    shared: Arc<SharedState>,
    tap: ObservationTap,
    raw: Vec<f32>,
    /// Scratch for interleaved output
    mono: Vec<f32>,
    sample_rate: f32,
    frames_rendered: u64,
    monitor_gain: f32,
    running: bool,
}

impl Pipeline {
    pub fn new(
        synth: Synthesizer,
        shared: Arc<SharedState>,
        tap: ObservationTap,
        monitor_gain: f32,
    ) -> Self {
        let applied_filter = shared.filter();
        Self {
            sample_rate: synth.sample_rate(),
            filter: FilterStage::new(&applied_filter),
            applied_filter,
            synth,
            shared,
            tap,
            raw: vec![0.0; MAX_BLOCK_SIZE],
            mono: vec![0.0; MAX_BLOCK_SIZE],
            frames_rendered: 0,
            monitor_gain,
            running: false,
        }
    }

    /// Build generators for `model` and start feeding the observation points.
    pub fn start(&mut self, model: &SignalModel) -> SourceStatus {
        let handle = self.synth.factory().build(model);
        self.start_with(handle)
    }

    /// Start with generators built off the audio path.
    pub fn start_with(&mut self, handle: SynthesisHandle) -> SourceStatus {
        self.running = true;
        self.synth.install(handle).status()
    }

    /// Swap the source while running; a stopped pipeline stays silent and
    /// drops `handle`.
    pub fn install(&mut self, handle: SynthesisHandle) -> SourceStatus {
        if !self.running {
            return SourceStatus::Stopped;
        }
        self.synth.install(handle).status()
    }

    /// Change the monitor amplitude of the running source in place.
    pub fn set_amplitude(&mut self, amplitude: f32) {
        self.synth.set_amplitude(amplitude);
    }

    /// Feed used the next time a live input source is built here.
    pub fn set_live_feed(&mut self, feed: LiveFeed) {
        self.synth.set_live_feed(feed);
    }

    /// Tear down the generators and clear filter state.
    pub fn stop(&mut self) {
        self.synth.stop();
        self.filter.reset();
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn status(&self) -> SourceStatus {
        self.synth.status()
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Continuous time of the next sample, in seconds
    pub fn clock(&self) -> f64 {
        self.frames_rendered as f64 / self.sample_rate as f64
    }

    pub fn filter_stage(&self) -> &FilterStage {
        &self.filter
    }

    pub fn replace_tap(&mut self, tap: ObservationTap) {
        self.tap = tap;
    }

    /// Frames lost because the refresh task fell behind
    pub fn dropped_frames(&self) -> u64 {
        self.tap.dropped()
    }

    /// Render mono output of any length.
    pub fn render(&mut self, out: &mut [f32]) {
        for block in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.render_block(block);
        }
    }

    /// Render into an interleaved buffer, copying mono to every channel.
    pub fn render_interleaved(&mut self, data: &mut [f32], channels: usize) {
        let channels = channels.max(1);
        let mut mono = std::mem::take(&mut self.mono);
        for frames in data.chunks_mut(MAX_BLOCK_SIZE * channels) {
            let len = frames.len() / channels;
            self.render_block(&mut mono[..len]);
            for (frame, &sample) in frames.chunks_mut(channels).zip(mono.iter()) {
                frame.fill(sample);
            }
        }
        self.mono = mono;
    }

    fn render_block(&mut self, out: &mut [f32]) {
        let len = out.len();
        let ctx = RenderCtx::new(self.sample_rate).at_time(self.clock());
        self.frames_rendered += len as u64;

        if !self.running {
            out.fill(0.0);
            return;
        }

        self.sync_filter(ctx.time);

        let raw = &mut self.raw[..len];
        self.synth.render_block(raw, &ctx);
        out.copy_from_slice(raw);
        self.filter.render_block(out, &ctx);

        self.tap.push_block(raw, out);

        let gain = self.monitor_gain * self.amplitude();
        for sample in out.iter_mut() {
            *sample *= gain;
        }
    }

    fn amplitude(&self) -> f32 {
        self.synth
            .active()
            .map_or(0.0, |handle| handle.model().amplitude)
    }

    fn sync_filter(&mut self, time: f64) {
        let current = self.shared.filter_swap().load();
        if !Arc::ptr_eq(&current, &self.applied_filter) {
            self.filter.apply(&current, time);
            self.applied_filter = Arc::clone(&current);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FilterKind, SignalKind};
    use crate::observe::observation_channel;
    use crate::synth::SourceFactory;

    const SR: f32 = 48_000.0;

    fn pipeline() -> (Pipeline, crate::observe::ObservationBus, Arc<SharedState>) {
        let shared = Arc::new(SharedState::new(
            SignalModel::default(),
            FilterConfiguration::default(),
        ));
        let (tap, bus) = observation_channel(16 * MAX_BLOCK_SIZE, 2048, 0.0);
        let pipeline = Pipeline::new(Synthesizer::new(SR), Arc::clone(&shared), tap, 0.4);
        (pipeline, bus, shared)
    }

    #[test]
    fn test_stopped_pipeline_is_silent_and_unobserved() {
        let (mut pipeline, mut bus, _) = pipeline();
        let mut out = vec![1.0; 512];
        pipeline.render(&mut out);

        assert!(out.iter().all(|&s| s == 0.0));
        assert_eq!(bus.drain(), 0);
        assert!((pipeline.clock() - 512.0 / SR as f64).abs() < 1e-12);
    }

    #[test]
    fn test_monitor_gain_scales_output_not_observation() {
        let (mut pipeline, mut bus, _) = pipeline();
        pipeline.start(&SignalModel {
            kind: SignalKind::Square,
            carrier_frequency_hz: 100.0,
            amplitude: 1.0,
            ..SignalModel::default()
        });
        let mut out = vec![0.0; 4096];
        pipeline.render(&mut out);

        let out_peak = out.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        bus.drain();
        let pair = bus.capture().expect("running pipeline feeds the tap");
        let raw_peak = pair.raw.time_domain.iter().fold(0.0f32, |m, s| m.max(s.abs()));

        assert!((raw_peak - 1.0).abs() < 1e-6, "raw peak {}", raw_peak);
        // Filter overshoot on the square edges stays well below 1.5
        assert!(out_peak > 0.3 && out_peak < 0.4 * 1.5, "monitor peak {}", out_peak);
    }

    #[test]
    fn test_filter_change_is_picked_up_between_blocks() {
        let (mut pipeline, _bus, shared) = pipeline();
        pipeline.start(&SignalModel::default());
        let mut out = vec![0.0; 256];
        pipeline.render(&mut out);

        shared.update_filter(|c| FilterConfiguration {
            kind: FilterKind::HighPass,
            cutoff_hz: 3_000.0,
            ..*c
        });
        pipeline.render(&mut out);

        assert_eq!(pipeline.filter_stage().config().kind, FilterKind::HighPass);
        let cutoff = pipeline.filter_stage().effective_cutoff_hz();
        assert!(cutoff > 1_000.0 && cutoff < 3_000.0, "should be ramping, got {}", cutoff);
    }

    #[test]
    fn test_interleaved_copies_mono_to_every_channel() {
        let (mut pipeline, _bus, _) = pipeline();
        pipeline.start(&SignalModel::default());
        let mut data = vec![0.0; 2 * 3000];
        pipeline.render_interleaved(&mut data, 2);

        for frame in data.chunks(2) {
            assert_eq!(frame[0], frame[1]);
        }
        assert!(data.iter().any(|&s| s != 0.0));
    }

    #[test]
    fn test_stop_tears_down_source() {
        let (mut pipeline, _bus, _) = pipeline();
        assert_eq!(pipeline.start(&SignalModel::default()), SourceStatus::Active);
        pipeline.stop();
        assert_eq!(pipeline.status(), SourceStatus::Stopped);

        let handle = SourceFactory::new(SR).build(&SignalModel::default());
        assert_eq!(pipeline.install(handle), SourceStatus::Stopped);
        assert_eq!(pipeline.status(), SourceStatus::Stopped);
    }

    #[test]
    fn test_amplitude_edit_scales_monitor_only() {
        let (mut pipeline, _bus, _) = pipeline();
        pipeline.start(&SignalModel {
            amplitude: 1.0,
            ..SignalModel::default()
        });
        let mut loud = vec![0.0; 1024];
        pipeline.render(&mut loud);

        pipeline.set_amplitude(0.25);
        let mut quiet = vec![0.0; 1024];
        pipeline.render(&mut quiet);

        let peak = |b: &[f32]| b.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(peak(&quiet) < peak(&loud) * 0.3);
        assert!(peak(&quiet) > 0.0);
    }
}
