//! TUI module for commlab
//!
//! Draws the latest display frame: scope, spectrum, impulse curve and link
//! statistics.

mod impulse;
mod spectrum;
mod stats;
mod time;

use std::sync::Arc;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use commlab::{
    analysis::DisplayFrame,
    model::{FilterConfiguration, SignalModel},
    synth::SourceStatus,
};

use super::app::Control;

use impulse::render_impulse;
use spectrum::render_spectrum;
use stats::render_stats;
use time::render_time;

/// Everything one UI frame draws from
pub struct View<'a> {
    pub frame: Option<Arc<DisplayFrame>>,
    pub signal: SignalModel,
    pub filter: FilterConfiguration,
    pub status: SourceStatus,
    pub running: bool,
    pub selected: Control,
    pub sample_rate: f32,
    pub fft_size: usize,
    pub device_name: &'a str,
}

/// Render the UI
pub fn render(frame: &mut Frame, view: &View) {
    let area = frame.area();

    // Main layout: charts, impulse + stats, help
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(55), // Scope + spectrum
            Constraint::Min(10),        // Impulse + stats
            Constraint::Length(1),      // Help bar
        ])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    let data = view.frame.as_deref();
    render_time(frame, top[0], data);
    render_spectrum(frame, top[1], data);
    render_impulse(frame, bottom[0], data);
    render_stats(frame, bottom[1], view);

    let help = Paragraph::new(
        " [Q] Quit  [Space] Start/Stop  [1-8] Signal  [↑↓] Select  [←→] Adjust  [F] Filter  [M] Mode  [A] Auto-tune",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, rows[2]);
}
