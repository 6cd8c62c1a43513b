//! Key handling and the UI event loop

use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;
use tracing::{info, warn};

use commlab::{
    engine::Lab,
    io::LiveCapture,
    model::{
        filter::{CUTOFF_RANGE, Q_RANGE},
        signal::{CARRIER_RANGE, MODULATOR_RANGE},
        FilterConfiguration, SignalKind, SignalModel, TuningMode,
    },
};

use super::ui;

/// Parameters adjustable with the arrow keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Carrier,
    Modulator,
    Depth,
    Amplitude,
    Cutoff,
    Q,
}

impl Control {
    pub const ALL: [Control; 6] = [
        Control::Carrier,
        Control::Modulator,
        Control::Depth,
        Control::Amplitude,
        Control::Cutoff,
        Control::Q,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Control::Carrier => "carrier",
            Control::Modulator => "modulator",
            Control::Depth => "depth",
            Control::Amplitude => "amplitude",
            Control::Cutoff => "cutoff",
            Control::Q => "Q",
        }
    }

    fn step(self, delta: i32) -> Control {
        let len = Control::ALL.len() as i32;
        let index = Control::ALL.iter().position(|&c| c == self).unwrap_or(0) as i32;
        Control::ALL[(index + delta).rem_euclid(len) as usize]
    }
}

/// Frequencies move by a semitone, linear values by 0.05
const SEMITONE: f32 = 1.059_463_1;
const LINEAR_STEP: f32 = 0.05;
const Q_STEP: f32 = 1.1;

/// Nudge a signal parameter one step up (`direction > 0`) or down.
pub fn adjust_signal(model: &SignalModel, control: Control, direction: f32) -> SignalModel {
    let ratio = if direction > 0.0 { SEMITONE } else { 1.0 / SEMITONE };
    let delta = LINEAR_STEP * direction.signum();
    let mut next = *model;
    match control {
        Control::Carrier => {
            next.carrier_frequency_hz =
                (model.carrier_frequency_hz * ratio).clamp(CARRIER_RANGE.0, CARRIER_RANGE.1)
        }
        Control::Modulator => {
            next.modulator_frequency_hz =
                (model.modulator_frequency_hz * ratio).clamp(MODULATOR_RANGE.0, MODULATOR_RANGE.1)
        }
        Control::Depth => next.modulation_depth = (model.modulation_depth + delta).clamp(0.0, 1.0),
        Control::Amplitude => next.amplitude = (model.amplitude + delta).clamp(0.0, 1.0),
        Control::Cutoff | Control::Q => {}
    }
    next
}

/// Nudge a filter parameter one step up (`direction > 0`) or down.
pub fn adjust_filter(
    config: &FilterConfiguration,
    control: Control,
    direction: f32,
) -> FilterConfiguration {
    let mut next = *config;
    match control {
        Control::Cutoff => {
            let ratio = if direction > 0.0 { SEMITONE } else { 1.0 / SEMITONE };
            next.cutoff_hz = (config.cutoff_hz * ratio).round().clamp(CUTOFF_RANGE.0, CUTOFF_RANGE.1)
        }
        Control::Q => {
            let ratio = if direction > 0.0 { Q_STEP } else { 1.0 / Q_STEP };
            next.q_factor = (config.q_factor * ratio).clamp(Q_RANGE.0, Q_RANGE.1)
        }
        _ => {}
    }
    next
}

/// Warn when captured audio will play back at the wrong pitch.
pub fn check_capture_rate(capture: &LiveCapture, output_rate: f32) {
    let capture_rate = capture.sample_rate() as f32;
    if capture_rate != output_rate {
        warn!(
            device = capture.device_name(),
            capture_rate,
            output_rate,
            "capture rate differs from output rate, live input is not resampled"
        );
    }
}

pub struct App {
    lab: Lab,
    device_name: String,
    /// Kept open for as long as the UI runs; the stream lives on this thread
    capture: Option<LiveCapture>,
    selected: Control,
    should_quit: bool,
}

impl App {
    pub fn new(lab: Lab, device_name: String, capture: Option<LiveCapture>) -> Self {
        Self {
            lab,
            device_name,
            capture,
            selected: Control::Carrier,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::render(frame, &self.view()))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        self.lab.stop();
        Ok(())
    }

    fn view(&self) -> ui::View<'_> {
        ui::View {
            frame: self.lab.latest_frame(),
            signal: *self.lab.signal(),
            filter: *self.lab.filter(),
            status: self.lab.status(),
            running: self.lab.is_running(),
            selected: self.selected,
            sample_rate: self.lab.sample_rate(),
            fft_size: self.lab.settings().fft_size,
            device_name: &self.device_name,
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => self.toggle_running(),
            KeyCode::Char(c @ '1'..='8') => {
                let index = c as usize - '1' as usize;
                let kind = SignalKind::ALL[index];
                if kind == SignalKind::LiveInput {
                    self.open_live_capture();
                }
                let model = self.lab.signal().with_kind(kind);
                let status = self.lab.set_signal(model);
                info!(kind = kind.label(), status = status.label(), "signal selected");
            }
            KeyCode::Up => self.selected = self.selected.step(-1),
            KeyCode::Down => self.selected = self.selected.step(1),
            KeyCode::Left => self.adjust(-1.0),
            KeyCode::Right => self.adjust(1.0),
            KeyCode::Char('f') => {
                self.lab.edit_filter(|c| FilterConfiguration {
                    kind: c.kind.next(),
                    ..*c
                });
            }
            KeyCode::Char('m') => {
                let mode = match self.lab.filter().tuning_mode {
                    TuningMode::Manual => TuningMode::Adaptive,
                    TuningMode::Adaptive => TuningMode::Manual,
                };
                self.lab.set_tuning_mode(mode);
            }
            KeyCode::Char('a') => self.lab.request_auto_tune(),
            _ => {}
        }
    }

    /// Ask for the capture device each time live input is chosen, until
    /// one is granted.
    fn open_live_capture(&mut self) {
        if self.capture.is_some() || self.lab.has_live_feed() {
            return;
        }
        match LiveCapture::open_default(self.lab.settings().ring_capacity()) {
            Ok((capture, feed)) => {
                check_capture_rate(&capture, self.lab.sample_rate());
                self.lab.attach_live_feed(feed);
                self.capture = Some(capture);
            }
            Err(err) => warn!(%err, "live input unavailable"),
        }
    }

    fn toggle_running(&mut self) {
        if self.lab.is_running() {
            self.lab.stop();
        } else if let Err(err) = self.lab.start() {
            warn!(%err, "failed to start");
        }
    }

    fn adjust(&mut self, direction: f32) {
        match self.selected {
            Control::Cutoff | Control::Q => {
                let control = self.selected;
                self.lab.edit_filter(|c| adjust_filter(c, control, direction));
            }
            control => {
                let model = adjust_signal(&self.lab.signal(), control, direction);
                self.lab.set_signal(model);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_selection_wraps() {
        assert_eq!(Control::Carrier.step(-1), Control::Q);
        assert_eq!(Control::Q.step(1), Control::Carrier);
    }

    #[test]
    fn test_carrier_steps_by_semitone_within_range() {
        let model = SignalModel::default();
        let up = adjust_signal(&model, Control::Carrier, 1.0);
        assert!((up.carrier_frequency_hz - 466.16).abs() < 0.01);

        let top = SignalModel {
            carrier_frequency_hz: 5_000.0,
            ..model
        };
        assert_eq!(adjust_signal(&top, Control::Carrier, 1.0).carrier_frequency_hz, 5_000.0);
    }

    #[test]
    fn test_depth_is_clamped() {
        let model = SignalModel {
            modulation_depth: 0.98,
            ..SignalModel::default()
        };
        assert_eq!(adjust_signal(&model, Control::Depth, 1.0).modulation_depth, 1.0);
    }

    #[test]
    fn test_filter_controls_leave_signal_alone() {
        let model = SignalModel::default();
        assert_eq!(adjust_signal(&model, Control::Cutoff, 1.0), model);

        let config = FilterConfiguration::default();
        let lower = adjust_filter(&config, Control::Cutoff, -1.0);
        assert_eq!(lower.cutoff_hz, 944.0);
        let q = adjust_filter(&config, Control::Q, 1.0);
        assert!((q.q_factor - 1.1).abs() < 1e-6);
    }
}
