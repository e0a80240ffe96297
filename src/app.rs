//! Application state and control logic.

use std::time::Instant;

use anyhow::Result;

use crate::data::{ChartSeries, DisplayState, Thresholds};
use crate::source::{ReadingSource, SourceEvent};
use crate::ui::Theme;

/// Connection/monitoring status shown in the status bar.
///
/// Mirrors the lifecycle of the refresh cycle: a one-shot probe result,
/// then monitoring toggled by the user, with per-tick failures overlaid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Waiting for the startup probe.
    Connecting,
    /// Probe passed; not yet monitoring.
    Connected(String),
    /// Probe failed; not fatal, monitoring can still be started.
    ConnectFailed(String),
    /// Periodic fetching is active.
    Monitoring,
    /// Monitoring was stopped by the user.
    Stopped,
    /// The last tick failed.
    QueryFailed(String),
}

impl Status {
    /// Status bar text.
    pub fn text(&self) -> String {
        match self {
            Status::Connecting => "Connecting...".to_string(),
            Status::Connected(msg) => format!("Connected ({})", msg),
            Status::ConnectFailed(msg) => format!("Connection failed: {}", msg),
            Status::Monitoring => "Monitoring...".to_string(),
            Status::Stopped => "Monitoring stopped".to_string(),
            Status::QueryFailed(msg) => format!("Query failed: {}", msg),
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub monitoring: bool,
    pub show_help: bool,

    source: Box<dyn ReadingSource>,
    pub display: DisplayState,
    pub chart: ChartSeries,
    pub thresholds: Thresholds,
    pub status: Status,
    pub last_updated: Option<Instant>,

    pub theme: Theme,

    // Temporary feedback, e.g. export confirmation
    status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App over the given source.
    pub fn new(source: Box<dyn ReadingSource>, thresholds: Thresholds) -> Self {
        Self {
            running: true,
            monitoring: false,
            show_help: false,
            source,
            display: DisplayState::default(),
            chart: ChartSeries::default(),
            thresholds,
            status: Status::Connecting,
            last_updated: None,
            theme: Theme::auto_detect(),
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Begin monitoring. The source fetches once immediately, then per
    /// interval. No-op if already monitoring.
    pub fn start(&mut self) {
        if !self.monitoring {
            self.monitoring = true;
            self.status = Status::Monitoring;
            self.source.start();
        }
    }

    /// Stop issuing future ticks. No-op if not monitoring.
    pub fn stop(&mut self) {
        if self.monitoring {
            self.monitoring = false;
            self.status = Status::Stopped;
            self.source.stop();
        }
    }

    /// Trigger one extra fetch outside the schedule.
    pub fn refresh_now(&mut self) {
        if self.monitoring {
            self.source.refresh();
        }
    }

    /// Drain all pending events from the source and apply them.
    pub fn pump_source(&mut self) {
        while let Some(event) = self.source.poll() {
            self.apply_event(event);
        }
    }

    /// Apply one source event to the presentation state.
    pub fn apply_event(&mut self, event: SourceEvent) {
        match event {
            SourceEvent::Connected(msg) => {
                if !self.monitoring {
                    self.status = Status::Connected(msg);
                }
            }
            SourceEvent::ConnectFailed(msg) => {
                if !self.monitoring {
                    self.status = Status::ConnectFailed(msg);
                }
            }
            SourceEvent::Fetch(Ok(readings)) => {
                self.display = DisplayState::from_readings(&readings, &self.thresholds);
                self.chart = ChartSeries::from_readings(&readings);
                self.last_updated = Some(Instant::now());
                if self.monitoring {
                    self.status = Status::Monitoring;
                }
            }
            SourceEvent::Fetch(Err(err)) => {
                // Readings must not go stale; the chart stays as drawn
                self.display = DisplayState::after_error(self.display.alarm);
                self.status = Status::QueryFailed(err.to_string());
            }
        }
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Export the current display state to a JSON file.
    pub fn export_state(&self, path: &std::path::Path) -> Result<()> {
        use std::io::Write;

        let export = serde_json::json!({
            "temperature": self.display.temperature.value(),
            "humidity": self.display.humidity.value(),
            "alarm": self.display.alarm,
            "status": self.status.text(),
            "exported_at": chrono::Utc::now().to_rfc3339(),
        });

        let json = serde_json::to_string_pretty(&export)?;
        let mut file = std::fs::File::create(path)?;
        file.write_all(json.as_bytes())?;

        Ok(())
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Field, Reading, ReadingCell};
    use crate::source::{ChannelSource, SourceError};
    use chrono::{FixedOffset, TimeZone};

    fn reading(secs: i64, field: Field, value: f64) -> Reading {
        Reading {
            time: FixedOffset::east_opt(0)
                .unwrap()
                .timestamp_opt(secs, 0)
                .unwrap(),
            field,
            value,
        }
    }

    fn app_with_channel() -> (
        tokio::sync::mpsc::UnboundedSender<SourceEvent>,
        App,
    ) {
        let (tx, source) = ChannelSource::create("test");
        let app = App::new(Box::new(source), Thresholds::default());
        (tx, app)
    }

    #[test]
    fn test_successful_fetch_updates_display_and_chart() {
        let (tx, mut app) = app_with_channel();
        app.start();

        tx.send(SourceEvent::Fetch(Ok(vec![
            reading(0, Field::Temperature, 36.0),
            reading(0, Field::Humidity, 50.0),
        ])))
        .unwrap();
        app.pump_source();

        assert_eq!(app.display.temperature.label(), "36.0");
        assert_eq!(app.display.humidity.label(), "50.0");
        assert!(app.display.alarm);
        assert_eq!(app.chart.temperature.len(), 1);
        assert_eq!(app.chart.humidity.len(), 1);
        assert!(app.last_updated.is_some());
        assert_eq!(app.status, Status::Monitoring);
    }

    #[test]
    fn test_failed_fetch_shows_error_and_keeps_chart() {
        let (tx, mut app) = app_with_channel();
        app.start();

        tx.send(SourceEvent::Fetch(Ok(vec![
            reading(0, Field::Temperature, 36.0),
            reading(10, Field::Temperature, 36.5),
        ])))
        .unwrap();
        app.pump_source();
        let chart_before = app.chart.clone();
        assert!(app.display.alarm);

        tx.send(SourceEvent::Fetch(Err(SourceError::Connection(
            "connection refused".to_string(),
        ))))
        .unwrap();
        app.pump_source();

        assert_eq!(app.display.temperature, ReadingCell::Error);
        assert_eq!(app.display.humidity, ReadingCell::Error);
        // The chart is left at its last drawn state
        assert_eq!(app.chart, chart_before);
        // The alarm indicator carries over
        assert!(app.display.alarm);
        assert!(matches!(app.status, Status::QueryFailed(_)));
        assert!(app.status.text().contains("connection refused"));
    }

    #[test]
    fn test_empty_fetch_clears_previous_values() {
        let (tx, mut app) = app_with_channel();
        app.start();

        tx.send(SourceEvent::Fetch(Ok(vec![reading(
            0,
            Field::Temperature,
            36.0,
        )])))
        .unwrap();
        app.pump_source();
        assert!(app.display.alarm);

        tx.send(SourceEvent::Fetch(Ok(vec![]))).unwrap();
        app.pump_source();

        assert_eq!(app.display.temperature, ReadingCell::Missing);
        assert_eq!(app.display.humidity, ReadingCell::Missing);
        assert!(!app.display.alarm);
        assert!(app.chart.is_empty());
    }

    #[test]
    fn test_start_stop_are_mutually_exclusive_states() {
        let (_tx, mut app) = app_with_channel();
        assert!(!app.monitoring);

        app.start();
        assert!(app.monitoring);
        assert_eq!(app.status, Status::Monitoring);

        // Redundant start is a no-op
        app.start();
        assert!(app.monitoring);

        app.stop();
        assert!(!app.monitoring);
        assert_eq!(app.status, Status::Stopped);
    }

    #[test]
    fn test_probe_result_does_not_clobber_monitoring_status() {
        let (tx, mut app) = app_with_channel();

        tx.send(SourceEvent::Connected("InfluxDB 2.7".to_string()))
            .unwrap();
        app.pump_source();
        assert_eq!(app.status, Status::Connected("InfluxDB 2.7".to_string()));

        app.start();
        tx.send(SourceEvent::ConnectFailed("late probe".to_string()))
            .unwrap();
        app.pump_source();
        assert_eq!(app.status, Status::Monitoring);
    }

    #[test]
    fn test_export_state() {
        let (tx, mut app) = app_with_channel();
        tx.send(SourceEvent::Fetch(Ok(vec![
            reading(0, Field::Temperature, 30.0),
            reading(0, Field::Humidity, 85.0),
        ])))
        .unwrap();
        app.pump_source();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        app.export_state(&path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["temperature"], 30.0);
        assert_eq!(json["humidity"], 85.0);
        assert_eq!(json["alarm"], true);
        assert!(json["exported_at"].is_string());
    }

    #[test]
    fn test_status_message_lifecycle() {
        let (_tx, mut app) = app_with_channel();
        assert!(app.get_status_message().is_none());
        app.set_status_message("Exported".to_string());
        assert_eq!(app.get_status_message(), Some("Exported"));
    }
}
