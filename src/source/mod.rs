//! Data source abstraction for receiving feed snapshots.
//!
//! This module provides a trait-based abstraction for receiving sensor
//! data from various backends (HTTP polling, in-memory channels).

mod channel;
mod http;
mod snapshot;

pub use channel::ChannelSource;
pub use http::{ApiClient, FetchError, HttpSource, RestClient};
pub use snapshot::{Alert, FeedSnapshot, Reading};

use std::fmt::Debug;

/// Trait for receiving feed snapshots from various backends.
///
/// Implementations provide snapshots from different sources - the REST
/// backend, or an in-memory channel for embedding and tests.
///
/// # Example
///
/// ```
/// use sensorwatch::{ChannelSource, DataSource};
///
/// let (tx, mut source) = ChannelSource::create("synthetic");
/// if let Some(snapshot) = source.poll() {
///     println!("{} readings", snapshot.readings.len());
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for the latest snapshot.
    ///
    /// Returns `Some(snapshot)` if new data is available, `None` otherwise.
    /// This method must be non-blocking.
    fn poll(&mut self) -> Option<FeedSnapshot>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;

    /// The last fetch error, if the most recent attempt failed.
    ///
    /// Cleared once a later attempt succeeds.
    fn error(&self) -> Option<String>;
}
