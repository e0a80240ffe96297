//! Terminal event polling and key handling.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;

/// Where `e` writes the current state.
const EXPORT_PATH: &str = "fermwatch-export.json";

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // Start/stop monitoring (mutually exclusive with current state)
        KeyCode::Char('s') => app.start(),
        KeyCode::Char('x') => app.stop(),

        // One extra fetch outside the schedule
        KeyCode::Char('r') => app.refresh_now(),

        // Export
        KeyCode::Char('e') => {
            let export_path = std::path::PathBuf::from(EXPORT_PATH);
            match app.export_state(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Thresholds;
    use crate::source::ChannelSource;
    use crossterm::event::KeyEvent;

    fn test_app() -> App {
        let (_tx, source) = ChannelSource::create("test");
        App::new(Box::new(source), Thresholds::default())
    }

    fn key(c: char) -> KeyEvent {
        KeyEvent::from(KeyCode::Char(c))
    }

    #[test]
    fn test_start_and_stop_keys() {
        let mut app = test_app();
        handle_key_event(&mut app, key('s'));
        assert!(app.monitoring);
        handle_key_event(&mut app, key('x'));
        assert!(!app.monitoring);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app();
        handle_key_event(&mut app, key('q'));
        assert!(!app.running);

        let mut app = test_app();
        handle_key_event(&mut app, KeyEvent::from(KeyCode::Esc));
        assert!(!app.running);
    }

    #[test]
    fn test_any_key_closes_help() {
        let mut app = test_app();
        handle_key_event(&mut app, key('?'));
        assert!(app.show_help);

        // 'q' closes the overlay instead of quitting
        handle_key_event(&mut app, key('q'));
        assert!(!app.show_help);
        assert!(app.running);
    }
}
