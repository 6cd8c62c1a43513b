//! Spectrum widget
//!
//! Normalized raw and filtered magnitudes with the theoretical response on
//! top.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use commlab::analysis::DisplayFrame;

/// Render the spectrum chart
pub fn render_spectrum(frame: &mut Frame, area: Rect, data: Option<&DisplayFrame>) {
    let block = Block::default()
        .title(" Spectrum ")
        .borders(Borders::ALL);

    let points = data.map(|d| d.frequency.as_slice()).unwrap_or_default();
    let series = |value: fn(&commlab::analysis::FrequencyPoint) -> f32| -> Vec<(f64, f64)> {
        points
            .iter()
            .map(|p| (p.frequency_hz as f64, value(p) as f64))
            .collect()
    };
    let raw = series(|p| p.raw);
    let filtered = series(|p| p.filtered);
    let theoretical = series(|p| p.theoretical);

    let datasets = vec![
        Dataset::default()
            .name("raw")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::DarkGray))
            .data(&raw),
        Dataset::default()
            .name("filtered")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Green))
            .data(&filtered),
        Dataset::default()
            .name("response")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Yellow))
            .data(&theoretical),
    ];

    let max_freq = points
        .last()
        .map(|p| p.frequency_hz as f64)
        .unwrap_or(0.0)
        .max(1.0);
    let max_khz = format!("{:.1}k", max_freq / 1000.0);

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, max_freq])
                .labels(vec!["0".to_string(), max_khz])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([0.0, 1.2])
                .labels(vec!["-100", "-40", "+20"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
