//! Channel-based data source.
//!
//! Receives feed snapshots via a tokio watch channel. This is useful for
//! embedding the dashboard in another application, or for pushing
//! synthetic data in tests and demos.

use tokio::sync::watch;

use super::{DataSource, FeedSnapshot};

/// A data source that receives feed snapshots via a channel.
///
/// The producer sends snapshots through the channel, and this source
/// provides them to the TUI.
///
/// # Example
///
/// ```
/// use sensorwatch::ChannelSource;
///
/// // Create a channel pair
/// let (tx, source) = ChannelSource::create("synthetic");
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<FeedSnapshot>,
    description: String,
    /// Track if we've returned the initial value yet
    initial_returned: bool,
}

impl ChannelSource {
    /// Create a new channel source.
    ///
    /// # Arguments
    ///
    /// * `receiver` - The receiving end of a watch channel
    /// * `source_description` - A description of where snapshots come from
    pub fn new(receiver: watch::Receiver<FeedSnapshot>, source_description: &str) -> Self {
        let description = format!("channel: {}", source_description);
        Self {
            receiver,
            description,
            initial_returned: false,
        }
    }

    /// Create a channel pair for sending snapshots to a ChannelSource.
    ///
    /// Returns (sender, source) where the sender can be used to push
    /// snapshots and the source can be used with the dashboard.
    pub fn create(source_description: &str) -> (watch::Sender<FeedSnapshot>, Self) {
        let (tx, rx) = watch::channel(FeedSnapshot::default());
        let source = Self::new(rx, source_description);
        (tx, source)
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<FeedSnapshot> {
        // Return the initial value on first poll
        if !self.initial_returned {
            self.initial_returned = true;
            self.receiver.mark_changed();
        }

        // Check if there's a new value without blocking
        if self.receiver.has_changed().unwrap_or(false) {
            let snapshot = self.receiver.borrow_and_update().clone();
            Some(snapshot)
        } else {
            None
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<String> {
        // Channel sources have no fetch errors; the producer side is
        // responsible for its own failures.
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Alert, Reading};
    use chrono::{TimeZone, Utc};

    fn sample_snapshot() -> FeedSnapshot {
        FeedSnapshot {
            readings: vec![Reading {
                id: 1,
                topic: "kitchen".to_string(),
                temperature: 21.0,
                humidity: 48.0,
                voltage: 3.3,
                timestamp: Utc.with_ymd_and_hms(2026, 8, 7, 9, 0, 0).unwrap(),
            }],
            alerts: Vec::<Alert>::new(),
        }
    }

    #[test]
    fn test_channel_source_poll() {
        let (tx, mut source) = ChannelSource::create("test");

        // Initially returns the default (empty) snapshot
        let snapshot = source.poll();
        assert!(snapshot.is_some());
        assert!(snapshot.unwrap().readings.is_empty());

        // No change, so poll returns None
        assert!(source.poll().is_none());

        // Send a new snapshot
        tx.send(sample_snapshot()).unwrap();

        let snapshot = source.poll();
        assert!(snapshot.is_some());
        assert_eq!(snapshot.unwrap().readings.len(), 1);
    }

    #[test]
    fn test_channel_source_description() {
        let (_tx, source) = ChannelSource::create("synthetic");
        assert_eq!(source.description(), "channel: synthetic");
        assert!(source.error().is_none());
    }
}
