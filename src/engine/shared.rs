use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use arc_swap::{ArcSwap, ArcSwapOption};

use crate::analysis::DisplayFrame;
use crate::model::{FilterConfiguration, SignalModel};
use crate::synth::SourceStatus;

/// State shared between the controller, the audio callback and the refresh
/// task.
///
/// Every field is either an atomic or an atomically swapped snapshot, so no
/// reader ever sees half of an update and nobody waits on a lock.
pub struct SharedState {
    signal: ArcSwap<SignalModel>,
    filter: ArcSwap<FilterConfiguration>,
    status: ArcSwap<SourceStatus>,
    active: AtomicBool,
    auto_tune_requested: AtomicBool,
    latest_frame: ArcSwapOption<DisplayFrame>,
}

impl SharedState {
    pub fn new(signal: SignalModel, filter: FilterConfiguration) -> Self {
        Self {
            signal: ArcSwap::from_pointee(signal),
            filter: ArcSwap::from_pointee(filter),
            status: ArcSwap::from_pointee(SourceStatus::Stopped),
            active: AtomicBool::new(false),
            auto_tune_requested: AtomicBool::new(false),
            latest_frame: ArcSwapOption::empty(),
        }
    }

    pub fn signal(&self) -> Arc<SignalModel> {
        self.signal.load_full()
    }

    pub fn set_signal(&self, model: SignalModel) {
        self.signal.store(Arc::new(model));
    }

    pub fn filter(&self) -> Arc<FilterConfiguration> {
        self.filter.load_full()
    }

    /// Raw access for readers that compare snapshots by identity
    pub(crate) fn filter_swap(&self) -> &ArcSwap<FilterConfiguration> {
        &self.filter
    }

    pub fn set_filter(&self, config: FilterConfiguration) {
        self.filter.store(Arc::new(config));
    }

    /// Apply `f` to the current filter configuration atomically.
    ///
    /// Retries if another writer swapped the configuration in between, so
    /// concurrent edits are never lost.
    pub fn update_filter<F>(&self, f: F) -> Arc<FilterConfiguration>
    where
        F: Fn(&FilterConfiguration) -> FilterConfiguration,
    {
        let mut updated = None;
        self.filter.rcu(|current| {
            let next = Arc::new(f(current));
            updated = Some(Arc::clone(&next));
            next
        });
        updated.unwrap_or_else(|| self.filter.load_full())
    }

    pub fn status(&self) -> SourceStatus {
        **self.status.load()
    }

    pub fn set_status(&self, status: SourceStatus) {
        self.status.store(Arc::new(status));
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::Release);
    }

    pub fn request_auto_tune(&self) {
        self.auto_tune_requested.store(true, Ordering::Release);
    }

    /// Consume a pending auto-tune request.
    pub fn take_auto_tune_request(&self) -> bool {
        self.auto_tune_requested.swap(false, Ordering::AcqRel)
    }

    pub fn latest_frame(&self) -> Option<Arc<DisplayFrame>> {
        self.latest_frame.load_full()
    }

    pub fn publish_frame(&self, frame: DisplayFrame) {
        self.latest_frame.store(Some(Arc::new(frame)));
    }

    pub fn clear_frame(&self) {
        self.latest_frame.store(None);
    }
}
