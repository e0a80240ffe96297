//! Rolling line chart for the queried window.
//!
//! Drawn only from the series of the last successful fetch; on the
//! error path the app never replaces the series, so the chart stays at
//! its last drawn state.

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::display::format_epoch;

/// Render the two-series chart, or a placeholder while no data exists.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Temperature & Humidity ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if app.chart.is_empty() {
        let placeholder = Paragraph::new("no data yet")
            .style(Style::default().fg(app.theme.muted))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let datasets = vec![
        Dataset::default()
            .name("temperature (°C)")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(app.theme.temperature))
            .data(&app.chart.temperature),
        Dataset::default()
            .name("humidity (%)")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(app.theme.humidity))
            .data(&app.chart.humidity),
    ];

    let [x_min, x_max] = app.chart.x_bounds();
    let [y_min, y_max] = app.chart.y_bounds();

    let x_labels = vec![
        Span::raw(format_epoch(x_min)),
        Span::raw(format_epoch((x_min + x_max) / 2.0)),
        Span::raw(format_epoch(x_max)),
    ];
    let y_labels = vec![
        Span::raw(format!("{:.0}", y_min)),
        Span::raw(format!("{:.0}", (y_min + y_max) / 2.0)),
        Span::raw(format!("{:.0}", y_max)),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(app.theme.muted))
                .bounds([x_min, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(app.theme.muted))
                .bounds([y_min, y_max])
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}
