//! Error types for reading sources.

use thiserror::Error;

/// Errors that can occur while querying or parsing readings.
///
/// Every variant is handled identically by the app: the status line
/// shows the message and the readings become error placeholders. No
/// source error is ever fatal.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The range query failed (HTTP error, bad status, refused query).
    #[error("query failed: {0}")]
    Query(String),

    /// Could not reach the server at all.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The server answered with a record we could not interpret.
    #[error("malformed record: {0}")]
    Parse(String),
}

impl From<influxdb2::RequestError> for SourceError {
    fn from(err: influxdb2::RequestError) -> Self {
        SourceError::Query(err.to_string())
    }
}
