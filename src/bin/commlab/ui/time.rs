//! Time-domain scope: raw against filtered

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use commlab::analysis::{series::TIME_SERIES_STRIDE, DisplayFrame};

/// Render the two-trace oscilloscope
pub fn render_time(frame: &mut Frame, area: Rect, data: Option<&DisplayFrame>) {
    let block = Block::default()
        .title(" Time domain ")
        .borders(Borders::ALL);

    let points = data.map(|d| d.time.as_slice()).unwrap_or_default();
    let raw: Vec<(f64, f64)> = points
        .iter()
        .map(|p| (p.sample_index as f64, p.raw as f64))
        .collect();
    let filtered: Vec<(f64, f64)> = points
        .iter()
        .map(|p| (p.sample_index as f64, p.filtered as f64))
        .collect();

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
            .style(Style::default().fg(Color::Cyan))
            .data(&filtered),
    ];

    let span = (points.len() * TIME_SERIES_STRIDE).max(1) as f64;
    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, span])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-1.0, 1.0])
                .labels(vec!["-1", "0", "1"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
