//! InfluxDB-backed reading source.
//!
//! Runs the fixed windowed range query against an InfluxDB v2 bucket on
//! a background tokio task and forwards outcomes to the UI loop over an
//! unbounded channel. The task performs a one-shot health probe on
//! spawn, then fetches once immediately on Start and once per interval
//! thereafter until Stop.

use std::time::Duration;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use influxdb2::models::Query;
use influxdb2::{Client, FromDataPoint};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::{Command, ReadingSource, SourceError, SourceEvent};
use crate::config::InfluxConfig;
use crate::data::{Field, Reading};

/// Measurement name written by the collector. The spelling is part of
/// the wire contract; do not correct it.
const MEASUREMENT: &str = "environtment";

/// Query window: the last minute of data.
const QUERY_RANGE: &str = "-1m";

/// Row cap on the windowed query.
const QUERY_LIMIT: usize = 10;

/// Build the fixed Flux query for the given bucket.
pub fn flux_query(bucket: &str) -> String {
    format!(
        r#"from(bucket: "{bucket}")
  |> range(start: {range})
  |> filter(fn: (r) => r._measurement == "{measurement}")
  |> filter(fn: (r) => (r._field == "{temperature}" or r._field == "{humidity}"))
  |> sort(columns: ["_time"], desc: false)
  |> limit(n: {limit})"#,
        bucket = bucket,
        range = QUERY_RANGE,
        measurement = MEASUREMENT,
        temperature = Field::Temperature.name(),
        humidity = Field::Humidity.name(),
        limit = QUERY_LIMIT,
    )
}

/// One row of the query result as mapped by the client.
#[derive(Debug, FromDataPoint)]
struct EnvRecord {
    field: String,
    value: f64,
    time: DateTime<FixedOffset>,
}

impl Default for EnvRecord {
    fn default() -> Self {
        Self {
            field: String::new(),
            value: 0.0,
            time: DateTime::<Utc>::MIN_UTC.with_timezone(&Utc.fix()),
        }
    }
}

/// Convert raw records to readings, skipping fields we do not display.
fn into_readings(records: Vec<EnvRecord>) -> Vec<Reading> {
    records
        .into_iter()
        .filter_map(|record| match Field::from_name(&record.field) {
            Some(field) => Some(Reading {
                time: record.time,
                field,
                value: record.value,
            }),
            None => {
                debug!(field = %record.field, "skipping record for unrelated field");
                None
            }
        })
        .collect()
}

/// A reading source backed by an InfluxDB v2 server.
///
/// Must be spawned from within a tokio runtime.
#[derive(Debug)]
pub struct InfluxSource {
    events: mpsc::UnboundedReceiver<SourceEvent>,
    commands: mpsc::UnboundedSender<Command>,
    description: String,
}

impl InfluxSource {
    /// Spawn the background fetch task for the given connection.
    pub fn spawn(config: InfluxConfig, interval: Duration) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let description = format!("influxdb: {} bucket \"{}\"", config.url, config.bucket);

        tokio::spawn(run(config, interval, cmd_rx, event_tx));

        Self {
            events: event_rx,
            commands: cmd_tx,
            description,
        }
    }
}

impl ReadingSource for InfluxSource {
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
    config: InfluxConfig,
    interval: Duration,
    mut commands: mpsc::UnboundedReceiver<Command>,
    events: mpsc::UnboundedSender<SourceEvent>,
) {
    let client = Client::new(&config.url, &config.org, &config.token);
    let query = flux_query(&config.bucket);

    let _ = events.send(probe(&client).await);

    let mut monitoring = false;
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            cmd = commands.recv() => match cmd {
                // UI side dropped the source; shut the task down
                None => break,
                Some(Command::Start) => {
                    monitoring = true;
                    ticker.reset();
                    fetch_and_send(&client, &query, &events).await;
                }
                Some(Command::Stop) => monitoring = false,
                Some(Command::Refresh) => {
                    if monitoring {
                        fetch_and_send(&client, &query, &events).await;
                    }
                }
            },
            _ = ticker.tick(), if monitoring => {
                fetch_and_send(&client, &query, &events).await;
            }
        }
    }
}

/// One-shot connectivity probe. Failure is surfaced, never fatal.
async fn probe(client: &Client) -> SourceEvent {
    match client.health().await {
        // The health endpoint answers non-2xx when not passing, which
        // the client surfaces as an error, so Ok means healthy here.
        Ok(health) => {
            let message = match health.version {
                Some(version) => format!("InfluxDB {}", version),
                None => "InfluxDB ready".to_string(),
            };
            info!(%message, "connectivity probe passed");
            SourceEvent::Connected(message)
        }
        Err(err) => {
            warn!(error = %err, "connectivity probe failed");
            SourceEvent::ConnectFailed(err.to_string())
        }
    }
}

async fn fetch_and_send(
    client: &Client,
    query: &str,
    events: &mpsc::UnboundedSender<SourceEvent>,
) {
    let result = fetch(client, query).await;
    match &result {
        Ok(readings) => debug!(count = readings.len(), "fetched readings"),
        Err(err) => warn!(error = %err, "fetch failed"),
    }
    let _ = events.send(SourceEvent::Fetch(result));
}

async fn fetch(client: &Client, query: &str) -> Result<Vec<Reading>, SourceError> {
    let records: Vec<EnvRecord> = client.query(Some(Query::new(query.to_string()))).await?;
    Ok(into_readings(records))
}
