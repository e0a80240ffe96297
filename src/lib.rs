//! # fermwatch
//!
//! A terminal dashboard for fermentation environment readings stored in
//! InfluxDB.
//!
//! On a fixed interval, fermwatch queries the last minute of
//! `temperature` and `humidity` readings from a bucket, shows the latest
//! values and a rolling two-series chart, and raises an alarm when a
//! reading exceeds its configured limit.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                       Application                         │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐   ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │──▶│ Terminal│ │
//! │  │ (state) │    │ (compute)│    │ (render)│   │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘   └─────────┘ │
//! │       │                                                   │
//! │       ▼                                                   │
//! │  ┌─────────┐                                              │
//! │  │ source  │◀── InfluxSource | DemoSource | ChannelSource │
//! │  │ (input) │                                              │
//! │  └─────────┘                                              │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, start/stop control, and the mapping
//!   from source events to presentation state
//! - **[`source`]**: Data source abstraction ([`ReadingSource`] trait);
//!   the InfluxDB implementation runs its fetches on a background task
//!   so a slow query never blocks rendering, and never overlaps the
//!   next tick
//! - **[`data`]**: Pure computation - latest values per field, the alarm
//!   flag, and the chart series, all derived from one query result
//! - **[`ui`]**: Terminal rendering using ratatui
//! - **[`config`]**: Layered connection settings (defaults, TOML file,
//!   environment)
//!
//! ## Usage
//!
//! ```bash
//! # Against a real server
//! fermwatch --config fermwatch.toml
//!
//! # Without a server
//! fermwatch --demo --start
//! ```
//!
//! ### As a library
//!
//! ```
//! use fermwatch::{App, ChannelSource, Thresholds};
//!
//! let (tx, source) = ChannelSource::create("example");
//! let app = App::new(Box::new(source), Thresholds::default());
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, Status};
pub use self::config::InfluxConfig;
pub use data::{ChartSeries, DisplayState, Field, Reading, ReadingCell, Thresholds};
pub use source::{
    ChannelSource, DemoSource, InfluxSource, ReadingSource, SourceError, SourceEvent,
};
