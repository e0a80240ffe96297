//! Synthetic reading source for running the dashboard without a server.
//!
//! Generates a plausible last-minute window of fermenter readings on
//! every tick. Temperature and humidity drift on slow sine waves whose
//! peaks cross the default alarm limits, so the alarm path is easy to
//! observe.

use std::time::Duration;

use chrono::{DateTime, Offset, Utc};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use super::{Command, ReadingSource, SourceEvent};
use crate::data::{Field, Reading};

/// Seconds between synthetic samples inside the window.
const SAMPLE_SPACING: i64 = 10;

/// Row cap, mirroring the real query.
const SAMPLE_LIMIT: usize = 10;

/// A reading source that fabricates its data.
///
/// Must be spawned from within a tokio runtime:
///
/// ```
/// use std::time::Duration;
/// use fermwatch::{DemoSource, ReadingSource, SourceEvent};
///
/// tokio_test::block_on(async {
///     let mut source = DemoSource::spawn(Duration::from_millis(10));
///     source.start();
///     tokio::time::sleep(Duration::from_millis(50)).await;
///     assert!(matches!(source.poll(), Some(SourceEvent::Connected(_))));
/// });
/// ```
#[derive(Debug)]
pub struct DemoSource {
    events: mpsc::UnboundedReceiver<SourceEvent>,
    commands: mpsc::UnboundedSender<Command>,
    description: String,
}

impl DemoSource {
    /// Spawn the background generator task.
    pub fn spawn(interval: Duration) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();

        tokio::spawn(run(interval, cmd_rx, event_tx));

        Self {
            events: event_rx,
            commands: cmd_tx,
            description: "demo: synthetic fermenter".to_string(),
        }
    }
}

impl ReadingSource for DemoSource {
    fn poll(&mut self) -> Option<SourceEvent> {
        self.events.try_recv().ok()
    }

    fn start(&mut self) {
        let _ = self.commands.send(Command::Start);
    }

    fn stop(&mut self) {
        let _ = self.commands.send(Command::Stop);
    }

    fn refresh(&mut self) {
        let _ = self.commands.send(Command::Refresh);
    }

    fn description(&self) -> &str {
        &self.description
    }
}

async fn run(
    interval: Duration,
    mut commands: mpsc::UnboundedReceiver<Command>,
    events: mpsc::UnboundedSender<SourceEvent>,
) {
    let _ = events.send(SourceEvent::Connected("demo data".to_string()));

    let mut monitoring = false;
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            cmd = commands.recv() => match cmd {
                None => break,
                Some(Command::Start) => {
                    monitoring = true;
                    ticker.reset();
                    let _ = events.send(SourceEvent::Fetch(Ok(generate(Utc::now()))));
                }
                Some(Command::Stop) => monitoring = false,
                Some(Command::Refresh) => {
                    if monitoring {
                        let _ = events.send(SourceEvent::Fetch(Ok(generate(Utc::now()))));
                    }
                }
            },
            _ = ticker.tick(), if monitoring => {
                let _ = events.send(SourceEvent::Fetch(Ok(generate(Utc::now()))));
            }
        }
    }
}

/// Fabricate one windowed result set ending at `now`, oldest first.
fn generate(now: DateTime<Utc>) -> Vec<Reading> {
    let offset = Utc.fix();
    let mut readings = Vec::new();

    for i in 0..6 {
        let time = now - chrono::Duration::seconds((5 - i) * SAMPLE_SPACING);
        let phase = time.timestamp() as f64;
        let temperature = 32.0 + 4.5 * (phase / 75.0).sin();
        let humidity = 72.0 + 10.0 * (phase / 110.0).cos();

        readings.push(Reading {
            time: time.with_timezone(&offset),
            field: Field::Temperature,
            value: temperature,
        });
        readings.push(Reading {
            time: time.with_timezone(&offset),
            field: Field::Humidity,
            value: humidity,
        });
    }

    // Mirror the real query's row cap
    readings.truncate(SAMPLE_LIMIT);
    readings
}
