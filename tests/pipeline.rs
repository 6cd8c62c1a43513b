use std::sync::Arc;
use std::time::{Duration, Instant};

use commlab::{
    analysis::DisplayFrame,
    engine::{Lab, Pipeline, RefreshWorker, SharedState},
    model::{FilterConfiguration, FilterKind, SignalKind, SignalModel, TuningMode},
    observe::observation_channel,
    synth::{SourceStatus, Synthesizer},
    MAX_BLOCK_SIZE,
};

const SR: f32 = 48_000.0;

struct Rig {
    pipeline: Pipeline,
    worker: RefreshWorker,
    shared: Arc<SharedState>,
}

impl Rig {
    fn new(signal: SignalModel, filter: FilterConfiguration) -> Self {
        let shared = Arc::new(SharedState::new(signal, filter));
        let (tap, bus) = observation_channel(16 * MAX_BLOCK_SIZE, 2048, 0.0);
        let mut pipeline = Pipeline::new(Synthesizer::new(SR), Arc::clone(&shared), tap, 0.4);
        let status = pipeline.start(&signal);
        shared.set_status(status);
        shared.set_active(true);
        let worker = RefreshWorker::new(Arc::clone(&shared), bus, SR);
        Self {
            pipeline,
            worker,
            shared,
        }
    }

    /// Render `seconds` of audio, then run one refresh pass.
    fn run(&mut self, seconds: f32) -> Arc<DisplayFrame> {
        let mut out = vec![0.0; 512];
        let blocks = (seconds * SR / out.len() as f32).ceil() as usize;
        for _ in 0..blocks {
            self.pipeline.render(&mut out);
        }
        assert!(self.worker.run_pass(), "pass should run while active");
        self.shared.latest_frame().expect("frame published")
    }
}

fn tone(frequency: f32) -> SignalModel {
    SignalModel {
        carrier_frequency_hz: frequency,
        ..SignalModel::default()
    }
}

fn filter(kind: FilterKind, cutoff_hz: f32) -> FilterConfiguration {
    FilterConfiguration {
        kind,
        cutoff_hz,
        ..FilterConfiguration::default()
    }
}

#[test]
fn low_pass_removes_tone_above_cutoff() {
    let mut rig = Rig::new(tone(4_000.0), filter(FilterKind::LowPass, 300.0));
    let frame = rig.run(0.2);

    assert!(frame.snr_db > 20.0, "expected strong attenuation, SNR {}", frame.snr_db);
}

#[test]
fn low_pass_keeps_tone_below_cutoff() {
    let mut rig = Rig::new(tone(200.0), filter(FilterKind::LowPass, 2_000.0));
    let frame = rig.run(0.2);

    assert!(frame.snr_db.abs() < 1.0, "tone should pass, SNR {}", frame.snr_db);
}

#[test]
fn display_series_have_fixed_lengths() {
    for kind in SignalKind::ALL {
        let mut rig = Rig::new(
            SignalModel::default().with_kind(kind),
            FilterConfiguration::default(),
        );
        let frame = rig.run(0.05);
        assert_eq!(frame.time.len(), 128, "{:?}", kind);
        assert_eq!(frame.frequency.len(), 128, "{:?}", kind);
        assert_eq!(frame.impulse.len(), 50, "{:?}", kind);
        assert!(frame.snr_db.is_finite(), "{:?}", kind);
        for point in &frame.frequency {
            assert!(point.raw >= 0.0 && point.filtered >= 0.0);
            assert!((0.0..=1.0).contains(&point.theoretical));
        }
    }
}

#[test]
fn live_input_without_device_reports_unavailable() {
    let mut rig = Rig::new(
        SignalModel::default().with_kind(SignalKind::LiveInput),
        FilterConfiguration::default(),
    );
    let frame = rig.run(0.05);

    assert_eq!(frame.status, SourceStatus::Unavailable);
    assert!(frame.time.iter().all(|p| p.raw == 0.0));
    assert_eq!(frame.snr_db, 0.0);
}

#[test]
fn composite_stays_within_headroom() {
    let mut rig = Rig::new(
        SignalModel::default().with_kind(SignalKind::Composite),
        FilterConfiguration::default(),
    );
    let frame = rig.run(0.1);

    let peak = frame.time.iter().fold(0.0f32, |m, p| m.max(p.raw.abs()));
    assert!(peak <= 0.55 + 1e-4, "composite peak {}", peak);
    assert!(peak > 0.2);
}

#[test]
fn auto_tune_follows_dominant_component() {
    let adaptive = FilterConfiguration {
        tuning_mode: TuningMode::Adaptive,
        ..filter(FilterKind::LowPass, 5_000.0)
    };
    let mut rig = Rig::new(tone(440.0), adaptive);
    rig.run(0.1);

    rig.shared.request_auto_tune();
    let frame = rig.run(0.02);

    // 440 Hz falls in bin 19 (445 Hz); low-pass lands 50% above it
    let cutoff = rig.shared.filter().cutoff_hz;
    assert_eq!(cutoff, 668.0);
    assert_eq!(frame.filter.cutoff_hz, 668.0);
    assert_eq!(cutoff.fract(), 0.0);
}

#[test]
fn filter_retune_glides_instead_of_jumping() {
    let mut rig = Rig::new(tone(1_000.0), filter(FilterKind::LowPass, 200.0));
    rig.run(0.1);

    rig.shared.set_filter(filter(FilterKind::LowPass, 4_000.0));
    let mut out = vec![0.0; 480];
    rig.pipeline.render(&mut out);

    // 10 ms into a 50 ms glide
    let cutoff = rig.pipeline.filter_stage().effective_cutoff_hz();
    assert!(cutoff > 400.0 && cutoff < 1_500.0, "cutoff {}", cutoff);
}

#[test]
fn callback_between_stop_steps_leaves_no_stale_samples() {
    let square = SignalModel::default().with_kind(SignalKind::Square);
    let mut rig = Rig::new(square, FilterConfiguration::default());
    rig.run(0.05);

    // Stop in the controller's order, with one audio callback landing
    // between halting the generators and resetting the worker
    rig.shared.set_active(false);
    rig.pipeline.stop();
    let mut out = vec![0.0; 512];
    rig.pipeline.render(&mut out);
    rig.worker.reset();

    let live = SignalModel::default().with_kind(SignalKind::LiveInput);
    rig.shared.set_status(rig.pipeline.start(&live));
    rig.shared.set_active(true);
    let frame = rig.run(0.02);

    let stale = frame.time.iter().filter(|p| p.raw != 0.0).count();
    assert_eq!(stale, 0, "raw samples left over from the stopped source");
    assert_eq!(frame.status, SourceStatus::Unavailable);
}

#[test]
fn lab_publishes_frames_from_refresh_thread() {
    let mut lab = Lab::builder(SR)
        .signal(tone(880.0))
        .build()
        .expect("default settings are valid");
    lab.start().expect("start");

    let renderer = lab.renderer();
    let mut out = vec![0.0; 1024];
    let deadline = Instant::now() + Duration::from_secs(2);
    let mut frame = None;
    while Instant::now() < deadline {
        renderer.render(&mut out);
        if let Some(latest) = lab.latest_frame().filter(|f| f.has_signal()) {
            frame = Some(latest);
            break;
        }
        std::thread::sleep(Duration::from_millis(5));
    }

    let frame = frame.expect("refresh task should publish a frame");
    assert_eq!(frame.status, SourceStatus::Active);
    assert_eq!(frame.time.len(), 128);

    lab.stop();
    assert!(lab.latest_frame().is_none());
}
