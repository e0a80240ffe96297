//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::app::Status;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and transient messages.
    pub highlight: Color,
    /// Color for the alarm banner and error states.
    pub alarm: Color,
    /// Color for healthy/connected states.
    pub ok: Color,
    /// Color for inactive or secondary text.
    pub muted: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Color for the temperature readout and series.
    pub temperature: Color,
    /// Color for the humidity readout and series.
    pub humidity: Color,
    /// Style for panel titles.
    pub header: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            alarm: Color::Red,
            ok: Color::Green,
            muted: Color::Gray,
            border: Color::Gray,
            temperature: Color::Red,
            humidity: Color::Blue,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            alarm: Color::Red,
            ok: Color::Green,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            temperature: Color::Red,
            humidity: Color::Blue,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Get style for a connection status
    pub fn status_style(&self, status: &Status) -> Style {
        match status {
            Status::Connected(_) | Status::Monitoring => Style::default().fg(self.ok),
            Status::ConnectFailed(_) | Status::QueryFailed(_) => {
                Style::default().fg(self.alarm).add_modifier(Modifier::BOLD)
            }
            Status::Connecting | Status::Stopped => Style::default().fg(self.muted),
        }
    }
}
