//! Data source abstraction for receiving sensor readings.
//!
//! This module provides a trait-based abstraction over where readings
//! come from: an InfluxDB bucket ([`InfluxSource`]), a synthetic
//! generator ([`DemoSource`]), or an in-memory channel ([`ChannelSource`])
//! for tests.
//!
//! Sources that talk to the outside world own a background tokio task.
//! The task owns the refresh timer and runs fetches sequentially, so a
//! slow fetch can never overlap the next one; start/stop only control
//! whether future ticks happen.

mod channel;
mod demo;
mod error;
mod influx;

pub use channel::ChannelSource;
pub use demo::DemoSource;
pub use error::SourceError;
pub use influx::{flux_query, InfluxSource};

use std::fmt::Debug;

use crate::data::Reading;

/// An event delivered by a source to the UI loop.
#[derive(Debug)]
pub enum SourceEvent {
    /// The startup connectivity probe succeeded.
    Connected(String),
    /// The startup connectivity probe failed. Non-fatal.
    ConnectFailed(String),
    /// Outcome of one tick of the refresh cycle.
    Fetch(Result<Vec<Reading>, SourceError>),
}

/// Control messages sent from the UI loop to a source task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Command {
    Start,
    Stop,
    Refresh,
}

/// Trait for receiving readings from various backends.
///
/// `poll` must be non-blocking; it drains whatever the source has
/// produced since the last call.
pub trait ReadingSource: Send + Debug {
    /// Poll for the next event, if any.
    fn poll(&mut self) -> Option<SourceEvent>;

    /// Begin periodic fetching. The first fetch happens immediately.
    fn start(&mut self);

    /// Stop issuing future ticks. An in-flight fetch is not cancelled.
    fn stop(&mut self);

    /// Trigger one extra fetch outside the schedule.
    fn refresh(&mut self) {}

    /// Human-readable description for the header bar.
    fn description(&self) -> &str;
}
