//! Terminal rendering using ratatui.

pub mod chart;
pub mod common;
pub mod readings;
pub mod theme;

pub use theme::Theme;
