//! Link statistics and control panel

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use commlab::{model::TuningMode, synth::SourceStatus};

use super::{Control, View};

/// Render the statistics panel
pub fn render_stats(frame: &mut Frame, area: Rect, view: &View) {
    let block = Block::default()
        .title(" commlab ")
        .borders(Borders::ALL);

    let status_color = match view.status {
        SourceStatus::Active => Color::Green,
        SourceStatus::Unavailable => Color::Red,
        SourceStatus::Stopped => Color::Yellow,
    };
    let snr = view.frame.as_ref().map_or(0.0, |f| f.snr_db);
    let mode = match view.filter.tuning_mode {
        TuningMode::Manual => "manual",
        TuningMode::Adaptive => "adaptive",
    };
    let play_symbol = if view.running { "▶" } else { "⏸" };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} {}  ", play_symbol, view.status.label()),
                Style::default().fg(status_color),
            ),
            Span::styled(
                format!("SNR {:+.1} dB  ", snr),
                Style::default().fg(Color::Magenta),
            ),
            Span::styled(
                format!(
                    "{:.1}kHz  {} pt  {}",
                    view.sample_rate / 1000.0,
                    view.fft_size,
                    view.device_name
                ),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(vec![
            Span::styled(
                format!(" signal {}  ", view.signal.kind.label()),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(
                format!(
                    "filter {} (order {}, {})",
                    view.filter.kind.label(),
                    view.filter.order,
                    mode
                ),
                Style::default().fg(Color::Cyan),
            ),
        ]),
    ];

    for control in Control::ALL {
        let value = match control {
            Control::Carrier => format!("{:.0} Hz", view.signal.carrier_frequency_hz),
            Control::Modulator => format!("{:.0} Hz", view.signal.modulator_frequency_hz),
            Control::Depth => format!("{:.2}", view.signal.modulation_depth),
            Control::Amplitude => format!("{:.2}", view.signal.amplitude),
            Control::Cutoff => format!("{:.0} Hz", view.filter.cutoff_hz),
            Control::Q => format!("{:.2}", view.filter.q_factor),
        };
        let style = if control == view.selected {
            Style::default().fg(Color::White).add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(Span::styled(
            format!(" {:<10} {:>10} ", control.label(), value),
            style,
        )));
    }

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
