//! Readings panel: latest temperature and humidity, plus the alarm banner.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

/// Render the two readouts side by side with the alarm line below.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).split(area);
    let cells = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    render_cell(
        frame,
        app,
        cells[0],
        "Temperature",
        &format!("{} °C", app.display.temperature.label()),
        app.theme.temperature,
    );
    render_cell(
        frame,
        app,
        cells[1],
        "Humidity",
        &format!("{} %", app.display.humidity.label()),
        app.theme.humidity,
    );

    // The banner row stays empty unless the alarm flag is set
    if app.display.alarm {
        let banner = Line::from(Span::styled(
            " ⚠ ALARM: temperature/humidity limit exceeded ",
            Style::default()
                .fg(app.theme.alarm)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(
            Paragraph::new(banner).alignment(Alignment::Center),
            rows[1],
        );
    }
}

fn render_cell(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    title: &str,
    value: &str,
    color: ratatui::style::Color,
) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let value_line = Line::from(Span::styled(
        value.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ));

    frame.render_widget(
        Paragraph::new(value_line)
            .block(block)
            .alignment(Alignment::Center),
        area,
    );
}
