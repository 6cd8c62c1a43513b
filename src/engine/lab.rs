use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{debug, info};

use crate::{
    analysis::DisplayFrame,
    engine::{
        pipeline::Pipeline,
        refresh::{RefreshTask, RefreshWorker},
        settings::AudioSettings,
        shared::SharedState,
    },
    graph::live::LiveFeed,
    model::{FilterConfiguration, SignalKind, SignalModel, TuningMode},
    observe::observation_channel,
    synth::{SourceFactory, SourceStatus, Synthesizer},
    LabError,
};

/// Controller for one running laboratory.
///
/// Owns the render pipeline and the refresh task. The audio backend renders
/// through an [`AudioRenderer`]; the front-end drives everything else through
/// this type and reads [`Lab::latest_frame`].
pub struct Lab {
    settings: AudioSettings,
    sample_rate: f32,
    shared: Arc<SharedState>,
    pipeline: Arc<Mutex<Pipeline>>,
    /// Builds generators on the control thread, outside the pipeline lock
    sources: SourceFactory,
    /// Parked while stopped
    worker: Option<RefreshWorker>,
    refresh: Option<RefreshTask>,
}

/// Builder for [`Lab`]
pub struct LabBuilder {
    sample_rate: f32,
    settings: AudioSettings,
    signal: SignalModel,
    filter: FilterConfiguration,
    live_feed: Option<LiveFeed>,
}

impl LabBuilder {
    pub fn settings(mut self, settings: AudioSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Initial signal model
    pub fn signal(mut self, signal: SignalModel) -> Self {
        self.signal = signal;
        self
    }

    /// Initial filter configuration
    pub fn filter(mut self, filter: FilterConfiguration) -> Self {
        self.filter = filter;
        self
    }

    /// Capture feed used by [`crate::model::SignalKind::LiveInput`]
    pub fn live_feed(mut self, feed: LiveFeed) -> Self {
        self.live_feed = Some(feed);
        self
    }

    pub fn build(self) -> Result<Lab, LabError> {
        self.settings.validate()?;
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(LabError::InvalidConfig {
                field: "sample_rate",
                reason: format!("{} is not a usable sample rate", self.sample_rate),
            });
        }

        let shared = Arc::new(SharedState::new(
            self.signal.clamped(),
            self.filter.clamped(),
        ));

        let mut sources = SourceFactory::new(self.sample_rate);
        if let Some(feed) = self.live_feed {
            sources = sources.with_live_feed(feed);
        }
        let synth = Synthesizer::with_factory(sources.clone());

        let (tap, bus) = observation_channel(
            self.settings.ring_capacity(),
            self.settings.fft_size,
            self.settings.smoothing,
        );
        let pipeline = Pipeline::new(synth, Arc::clone(&shared), tap, self.settings.monitor_gain);
        let worker = RefreshWorker::new(Arc::clone(&shared), bus, self.sample_rate);

        debug!(
            sample_rate = self.sample_rate,
            fft_size = self.settings.fft_size,
            "lab created"
        );

        Ok(Lab {
            settings: self.settings,
            sample_rate: self.sample_rate,
            shared,
            pipeline: Arc::new(Mutex::new(pipeline)),
            sources,
            worker: Some(worker),
            refresh: None,
        })
    }
}

impl Lab {
    pub fn builder(sample_rate: f32) -> LabBuilder {
        LabBuilder {
            sample_rate,
            settings: AudioSettings::default(),
            signal: SignalModel::default(),
            filter: FilterConfiguration::default(),
            live_feed: None,
        }
    }

    /// Start the generators and the refresh task.
    ///
    /// Starting a running lab is a no-op.
    pub fn start(&mut self) -> Result<SourceStatus, LabError> {
        if self.refresh.is_some() {
            return Ok(self.shared.status());
        }

        let model = self.shared.signal();
        let handle = self.sources.build(&model);
        let status = lock(&self.pipeline).start_with(handle);
        self.shared.set_status(status);
        self.shared.set_active(true);

        let worker = match self.worker.take() {
            Some(worker) => worker,
            None => self.rebuild_observation(),
        };
        let period = Duration::from_secs_f32(1.0 / self.settings.refresh_hz);
        self.refresh = Some(RefreshTask::spawn(worker, period)?);

        info!(kind = model.kind.label(), status = status.label(), "lab started");
        Ok(status)
    }

    /// Tear down the generators and cancel the refresh task.
    ///
    /// The generators go first, so nothing rendered after this call reaches
    /// the observation ring the parked worker is reset against.
    pub fn stop(&mut self) {
        self.shared.set_active(false);
        lock(&self.pipeline).stop();
        if let Some(task) = self.refresh.take() {
            self.worker = task.cancel().map(|mut worker| {
                worker.reset();
                worker
            });
        }
        self.shared.set_status(SourceStatus::Stopped);
        self.shared.clear_frame();
        info!("lab stopped");
    }

    pub fn is_running(&self) -> bool {
        self.refresh.is_some()
    }

    /// Replace the signal model; a running lab rebuilds its generators.
    ///
    /// An edit that only changes `amplitude` keeps the generators (and their
    /// phase) and just rescales the monitor output.
    pub fn set_signal(&mut self, model: SignalModel) -> SourceStatus {
        let model = model.clamped();
        let previous = self.shared.signal();
        self.shared.set_signal(model);
        if !self.is_running() {
            return SourceStatus::Stopped;
        }

        if previous.same_source(&model) {
            lock(&self.pipeline).set_amplitude(model.amplitude);
            return self.shared.status();
        }

        let handle = self.sources.build(&model);
        let status = lock(&self.pipeline).install(handle);
        self.shared.set_status(status);
        status
    }

    /// Attach a capture feed opened after the lab was built.
    ///
    /// A running live input source is rebuilt on the new feed, so its status
    /// moves from [`SourceStatus::Unavailable`] to [`SourceStatus::Active`].
    pub fn attach_live_feed(&mut self, feed: LiveFeed) -> SourceStatus {
        self.sources.set_live_feed(feed.clone());
        lock(&self.pipeline).set_live_feed(feed);
        info!("live feed attached");

        let model = self.shared.signal();
        if !self.is_running() || model.kind != SignalKind::LiveInput {
            return self.shared.status();
        }
        let handle = self.sources.build(&model);
        let status = lock(&self.pipeline).install(handle);
        self.shared.set_status(status);
        status
    }

    pub fn has_live_feed(&self) -> bool {
        self.sources.has_live_feed()
    }

    /// Publish a new filter configuration.
    ///
    /// The audio path picks it up at its next block and glides to it.
    pub fn update_filter(&self, config: FilterConfiguration) -> Arc<FilterConfiguration> {
        let config = config.clamped();
        debug!(
            kind = config.kind.label(),
            cutoff_hz = config.cutoff_hz,
            q = config.q_factor,
            "filter updated"
        );
        self.shared.set_filter(config);
        self.shared.filter()
    }

    /// Edit the current filter configuration in place.
    pub fn edit_filter<F>(&self, edit: F) -> Arc<FilterConfiguration>
    where
        F: Fn(&FilterConfiguration) -> FilterConfiguration,
    {
        self.shared.update_filter(|current| edit(current).clamped())
    }

    pub fn set_tuning_mode(&self, mode: TuningMode) -> Arc<FilterConfiguration> {
        self.edit_filter(|current| FilterConfiguration {
            tuning_mode: mode,
            ..*current
        })
    }

    /// Ask the next refresh pass for a cutoff suggestion.
    ///
    /// Honoured only in [`TuningMode::Adaptive`].
    pub fn request_auto_tune(&self) {
        self.shared.request_auto_tune();
    }

    pub fn latest_frame(&self) -> Option<Arc<DisplayFrame>> {
        self.shared.latest_frame()
    }

    pub fn signal(&self) -> Arc<SignalModel> {
        self.shared.signal()
    }

    pub fn filter(&self) -> Arc<FilterConfiguration> {
        self.shared.filter()
    }

    pub fn status(&self) -> SourceStatus {
        self.shared.status()
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn settings(&self) -> &AudioSettings {
        &self.settings
    }

    /// Handle for the audio callback
    pub fn renderer(&self) -> AudioRenderer {
        AudioRenderer {
            pipeline: Arc::clone(&self.pipeline),
        }
    }

    /// A fresh ring and bus, used when the previous worker was lost.
    fn rebuild_observation(&mut self) -> RefreshWorker {
        let (tap, bus) = observation_channel(
            self.settings.ring_capacity(),
            self.settings.fft_size,
            self.settings.smoothing,
        );
        lock(&self.pipeline).replace_tap(tap);
        RefreshWorker::new(Arc::clone(&self.shared), bus, self.sample_rate)
    }
}

impl Drop for Lab {
    fn drop(&mut self) {
        if self.is_running() {
            self.stop();
        }
    }
}

/// Cloneable handle the audio callback renders through.
#[derive(Clone)]
pub struct AudioRenderer {
    pipeline: Arc<Mutex<Pipeline>>,
}

impl AudioRenderer {
    /// Fill an interleaved output buffer.
    pub fn render_interleaved(&self, data: &mut [f32], channels: usize) {
        lock(&self.pipeline).render_interleaved(data, channels);
    }

    /// Fill a mono output buffer.
    pub fn render(&self, out: &mut [f32]) {
        lock(&self.pipeline).render(out);
    }

    /// Frames the refresh task could not keep up with
    pub fn dropped_frames(&self) -> u64 {
        lock(&self.pipeline).dropped_frames()
    }
}

// A panic elsewhere must not silence the audio callback
fn lock(pipeline: &Mutex<Pipeline>) -> MutexGuard<'_, Pipeline> {
    pipeline.lock().unwrap_or_else(PoisonError::into_inner)
}
