//! Channel-based reading source.
//!
//! Receives events over an in-memory channel. Used by tests to drive
//! the app without a server or a background task.

use tokio::sync::mpsc;

use super::{ReadingSource, SourceEvent};

/// A reading source fed by hand through a channel.
#[derive(Debug)]
pub struct ChannelSource {
    events: mpsc::UnboundedReceiver<SourceEvent>,
    description: String,
    monitoring: bool,
}

impl ChannelSource {
    /// Create a channel pair: a sender for pushing events and the source.
    pub fn create(description: &str) -> (mpsc::UnboundedSender<SourceEvent>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        let source = Self {
            events: rx,
            description: format!("channel: {}", description),
            monitoring: false,
        };
        (tx, source)
    }

    /// Whether start has been requested without a subsequent stop.
    pub fn monitoring(&self) -> bool {
        self.monitoring
    }
}

impl ReadingSource for ChannelSource {
    fn poll(&mut self) -> Option<SourceEvent> {
        self.events.try_recv().ok()
    }

    fn start(&mut self) {
        self.monitoring = true;
    }

    fn stop(&mut self) {
        self.monitoring = false;
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceError;

    #[test]
    fn test_channel_source_poll_drains_in_order() {
        let (tx, mut source) = ChannelSource::create("test");
        assert!(source.poll().is_none());

        tx.send(SourceEvent::Connected("ok".to_string())).unwrap();
        tx.send(SourceEvent::Fetch(Err(SourceError::Connection(
            "refused".to_string(),
        ))))
        .unwrap();

        assert!(matches!(source.poll(), Some(SourceEvent::Connected(_))));
        assert!(matches!(source.poll(), Some(SourceEvent::Fetch(Err(_)))));
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_channel_source_start_stop() {
        let (_tx, mut source) = ChannelSource::create("test");
        assert!(!source.monitoring());
        source.start();
        assert!(source.monitoring());
        source.stop();
        assert!(!source.monitoring());
    }

    #[test]
    fn test_description() {
        let (_tx, source) = ChannelSource::create("fermenter");
        assert_eq!(source.description(), "channel: fermenter");
    }
}
