use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::{
    analysis::{compute_frame, suggest_cutoff},
    engine::shared::SharedState,
    model::{FilterConfiguration, TuningMode},
    observe::{ObservationBus, SnapshotPair},
    LabError,
};

/// One refresh pass at a time: drains the observation ring, derives a
/// display frame and publishes it.
pub struct RefreshWorker {
    shared: Arc<SharedState>,
    bus: ObservationBus,
    sample_rate: f32,
}

impl RefreshWorker {
    pub fn new(shared: Arc<SharedState>, bus: ObservationBus, sample_rate: f32) -> Self {
        Self {
            shared,
            bus,
            sample_rate,
        }
    }

    /// Run one pass. Returns `false` when the pipeline is inactive and
    /// nothing was done.
    pub fn run_pass(&mut self) -> bool {
        if !self.shared.is_active() {
            if self.shared.take_auto_tune_request() {
                debug!("auto-tune ignored while stopped");
            }
            return false;
        }

        self.bus.drain();
        let snapshots = self.bus.capture();

        let mut filter = self.shared.filter();
        if self.shared.take_auto_tune_request() {
            filter = self.auto_tune(snapshots.as_ref(), filter);
        }

        let frame = compute_frame(
            snapshots.as_ref(),
            &filter,
            self.sample_rate,
            self.shared.status(),
        );
        self.shared.publish_frame(frame);
        true
    }

    fn auto_tune(
        &self,
        snapshots: Option<&SnapshotPair>,
        filter: Arc<FilterConfiguration>,
    ) -> Arc<FilterConfiguration> {
        if filter.tuning_mode != TuningMode::Adaptive {
            debug!("auto-tune ignored in manual tuning mode");
            return filter;
        }
        let Some(pair) = snapshots else {
            debug!("auto-tune requested before anything was observed");
            return filter;
        };

        let suggestion = suggest_cutoff(&pair.raw.frequency_db, filter.kind, self.sample_rate);
        info!(
            kind = filter.kind.label(),
            from_hz = filter.cutoff_hz,
            to_hz = suggestion,
            "auto-tune applied"
        );
        self.shared.update_filter(|current| FilterConfiguration {
            cutoff_hz: suggestion,
            ..*current
        })
    }

    /// Loop until `cancel` is set, one pass per `period`.
    fn run(&mut self, cancel: &AtomicBool, period: Duration) {
        info!(period_ms = period.as_millis() as u64, "refresh task started");
        while !cancel.load(Ordering::Acquire) {
            let started = Instant::now();
            self.run_pass();
            if let Some(rest) = period.checked_sub(started.elapsed()) {
                thread::sleep(rest);
            }
        }
        info!("refresh task stopped");
    }

    /// Forget everything observed so far.
    pub fn reset(&mut self) {
        self.bus.reset();
    }
}

/// Handle to the periodic refresh thread.
///
/// Dropping the handle cancels the task and waits for the current pass to
/// finish.
pub struct RefreshTask {
    cancel: Arc<AtomicBool>,
    handle: Option<JoinHandle<RefreshWorker>>,
}

impl RefreshTask {
    pub fn spawn(mut worker: RefreshWorker, period: Duration) -> Result<Self, LabError> {
        let cancel = Arc::new(AtomicBool::new(false));
        let token = Arc::clone(&cancel);

        let handle = thread::Builder::new()
            .name("commlab-refresh".into())
            .spawn(move || {
                worker.run(&token, period);
                worker
            })?;

        Ok(Self {
            cancel,
            handle: Some(handle),
        })
    }

    /// Stop the task and hand the worker back for a later restart.
    ///
    /// Returns `None` if the thread panicked.
    pub fn cancel(mut self) -> Option<RefreshWorker> {
        self.cancel.store(true, Ordering::Release);
        let handle = self.handle.take()?;
        match handle.join() {
            Ok(worker) => Some(worker),
            Err(_) => {
                warn!("refresh task panicked");
                None
            }
        }
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        self.cancel.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FilterKind, SignalModel};
    use crate::observe::observation_channel;
    use crate::synth::SourceStatus;
    use crate::MAX_BLOCK_SIZE;

    const SR: f32 = 48_000.0;

    fn tone(frequency: f32, frames: usize) -> Vec<f32> {
        (0..frames)
            .map(|i| (std::f32::consts::TAU * frequency * i as f32 / SR).sin())
            .collect()
    }

    fn worker(filter: FilterConfiguration) -> (RefreshWorker, crate::observe::ObservationTap, Arc<SharedState>) {
        let shared = Arc::new(SharedState::new(SignalModel::default(), filter));
        let (tap, bus) = observation_channel(4 * MAX_BLOCK_SIZE, 2048, 0.0);
        (RefreshWorker::new(Arc::clone(&shared), bus, SR), tap, shared)
    }

    #[test]
    fn test_inactive_pass_does_nothing() {
        let (mut worker, _tap, shared) = worker(FilterConfiguration::default());
        assert!(!worker.run_pass());
        assert!(shared.latest_frame().is_none());
    }

    #[test]
    fn test_active_pass_publishes_frame() {
        let (mut worker, mut tap, shared) = worker(FilterConfiguration::default());
        shared.set_active(true);
        shared.set_status(SourceStatus::Active);

        let signal = tone(440.0, 2048);
        tap.push_block(&signal, &signal);
        assert!(worker.run_pass());

        let frame = shared.latest_frame().expect("frame published");
        assert_eq!(frame.time.len(), 128);
        assert_eq!(frame.frequency.len(), 128);
        assert_eq!(frame.status, SourceStatus::Active);
        assert!(frame.snr_db.abs() < 1e-3);
    }

    #[test]
    fn test_auto_tune_only_in_adaptive_mode() {
        let manual = FilterConfiguration::default();
        let (mut worker, mut tap, shared) = worker(manual);
        shared.set_active(true);

        // Bin 20 of a 2048-point transform at 48 kHz is 468.75 Hz
        let signal = tone(468.75, 2048);
        tap.push_block(&signal, &signal);

        shared.request_auto_tune();
        worker.run_pass();
        assert_eq!(shared.filter().cutoff_hz, manual.cutoff_hz);

        shared.set_filter(FilterConfiguration {
            tuning_mode: TuningMode::Adaptive,
            ..manual
        });
        shared.request_auto_tune();
        worker.run_pass();

        let tuned = shared.filter();
        assert_eq!(tuned.kind, FilterKind::LowPass);
        assert_eq!(tuned.cutoff_hz, 703.0);
        assert_eq!(shared.latest_frame().map(|f| f.filter.cutoff_hz), Some(703.0));
    }

    #[test]
    fn test_task_cancels_and_returns_worker() {
        let (worker, _tap, shared) = worker(FilterConfiguration::default());
        shared.set_active(true);

        let task = RefreshTask::spawn(worker, Duration::from_millis(5)).expect("spawn");
        thread::sleep(Duration::from_millis(30));
        let worker = task.cancel();

        assert!(worker.is_some());
        assert!(shared.latest_frame().is_some());
    }
}
