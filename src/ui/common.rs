//! Common UI components: header bar, status bar, and help overlay.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;

/// Render the header bar: status indicator, app name, source, alarm tag.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(" ● ", app.theme.status_style(&app.status)),
        Span::styled("FERMWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(
            app.source_description(),
            Style::default().fg(app.theme.muted),
        ),
    ];

    if app.display.alarm {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            "ALARM",
            Style::default()
                .fg(app.theme.alarm)
                .add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the status bar at the bottom.
///
/// Shows the connection/monitoring status, time since last update, and
/// key hints; start and stop hints swap with the monitoring state.
/// Temporary status messages take precedence.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let updated = match app.last_updated {
        Some(at) => format!("{:.1}s ago", at.elapsed().as_secs_f64()),
        None => "never".to_string(),
    };

    let controls = if app.monitoring {
        "x:stop r:refresh e:export ?:help q:quit"
    } else {
        "s:start e:export ?:help q:quit"
    };

    let status = format!(" {} | Updated {} | {}", app.status.text(), updated, controls);
    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from("  s        Start monitoring"),
        Line::from("  x        Stop monitoring"),
        Line::from("  r        Refresh now (while monitoring)"),
        Line::from("  e        Export current state to JSON"),
        Line::from("  ?        Toggle this help"),
        Line::from("  q, Esc   Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().fg(app.theme.muted),
        )]),
    ];

    let popup = centered_rect(44, 12, area);
    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(help_text)
            .block(block)
            .alignment(Alignment::Left),
        popup,
    );
}

/// Center a fixed-size rect inside `area`, clamped to its bounds.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [area] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(ratatui::layout::Flex::Center)
        .areas(area);
    let [area] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(ratatui::layout::Flex::Center)
        .areas(area);
    area
}
