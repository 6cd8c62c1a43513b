//! Impulse curve widget

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use commlab::analysis::{series::IMPULSE_SERIES_POINTS, DisplayFrame};

pub fn render_impulse(frame: &mut Frame, area: Rect, data: Option<&DisplayFrame>) {
    let block = Block::default()
        .title(" Impulse (illustrative) ")
        .borders(Borders::ALL);

    let points: Vec<(f64, f64)> = data
        .map(|d| {
            d.impulse
                .iter()
                .map(|p| (p.step_index as f64, p.value as f64))
                .collect()
        })
        .unwrap_or_default();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Magenta))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, IMPULSE_SERIES_POINTS as f64])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-1.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
