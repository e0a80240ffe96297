//! Data models and pure computation for the refresh cycle.
//!
//! This module turns a raw query result (a small list of [`Reading`]s)
//! into everything the UI needs:
//!
//! - [`DisplayState`]: latest value per field plus the alarm flag
//! - [`ChartSeries`]: time-ordered `(timestamp, value)` series per field
//!
//! Both are recomputed wholesale from each result set; neither retains
//! memory of prior ticks.

pub mod display;
pub mod reading;

pub use display::{ChartSeries, DisplayState, ReadingCell, Thresholds};
pub use reading::{Field, Reading};
