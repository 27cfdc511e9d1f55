//! HTTP polling data source.
//!
//! Fetches readings and alerts from the REST backend on a fixed cadence
//! and hands completed snapshots to the UI thread through a channel.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::{Alert, DataSource, FeedSnapshot, Reading};

/// Errors from a single fetch cycle.
///
/// All variants are handled identically at the poll boundary: the tick is
/// skipped and the previously fetched collections stay on screen. The
/// distinction only shows up in the log line and the status bar.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("backend returned status {0}")]
    Status(u16),

    /// The response body was not the expected JSON.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

/// Client for the readings/alerts REST endpoints.
///
/// Abstracted behind a trait so the polling machinery can be exercised in
/// tests without a network.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// `GET /data` - the full readings collection, most-recent-first.
    async fn fetch_readings(&self) -> Result<Vec<Reading>, FetchError>;

    /// `GET /alerts` - the active alerts collection, most-recent-first.
    async fn fetch_alerts(&self) -> Result<Vec<Alert>, FetchError>;

    /// Endpoint identity, for display in the status bar.
    fn endpoint(&self) -> &str;
}

/// `ApiClient` backed by reqwest against the ingestion backend.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
}

impl RestClient {
    /// Create a client for the given base URL (e.g. `http://127.0.0.1:8000`).
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(url.as_str()).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        response.json().await.map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ApiClient for RestClient {
    async fn fetch_readings(&self) -> Result<Vec<Reading>, FetchError> {
        self.get_json("/data").await
    }

    async fn fetch_alerts(&self) -> Result<Vec<Alert>, FetchError> {
        self.get_json("/alerts").await
    }

    fn endpoint(&self) -> &str {
        &self.base_url
    }
}

/// Outcome of one issued fetch, tagged with its issue-order sequence.
#[derive(Debug)]
struct FetchOutcome {
    seq: u64,
    result: Result<FeedSnapshot, FetchError>,
}

/// A data source that polls the REST backend on a fixed interval.
///
/// `spawn` starts a background task: an immediate first fetch, then one
/// per interval tick. Each tick issues its fetch independently of whether
/// the previous one completed, so in-flight requests can overlap on a slow
/// network. Responses are tagged with an issue-order sequence number and
/// [`poll`](DataSource::poll) discards any response older than the newest
/// one already applied.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use std::time::Duration;
/// use sensorwatch::{HttpSource, RestClient};
///
/// # tokio_test::block_on(async {
/// let client = Arc::new(RestClient::new("http://127.0.0.1:8000"));
/// let source = HttpSource::spawn(client, Duration::from_secs(3));
/// # });
/// ```
#[derive(Debug)]
pub struct HttpSource {
    receiver: mpsc::Receiver<FetchOutcome>,
    description: String,
    last_applied: u64,
    last_error: Option<String>,
    ticker: JoinHandle<()>,
}

impl HttpSource {
    /// Spawn the repeating fetch schedule. Must be called within a tokio
    /// runtime.
    pub fn spawn(client: Arc<dyn ApiClient>, interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel(16);
        let description = format!("http: {}", client.endpoint());

        let ticker = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            let mut seq: u64 = 0;

            loop {
                ticker.tick().await;
                seq += 1;

                let client = Arc::clone(&client);
                let tx = tx.clone();

                // Ticks fire on cadence, not on completion of the previous
                // fetch; stale responses are reconciled by sequence number
                // at the poll boundary.
                tokio::spawn(async move {
                    let result = fetch_snapshot(client.as_ref()).await;
                    if let Err(ref e) = result {
                        tracing::warn!("fetch #{} failed: {}", seq, e);
                    } else {
                        tracing::debug!("fetch #{} completed", seq);
                    }
                    let _ = tx.send(FetchOutcome { seq, result }).await;
                });
            }
        });

        Self {
            receiver: rx,
            description,
            last_applied: 0,
            last_error: None,
            ticker,
        }
    }

    /// Cancel the repeating schedule.
    ///
    /// In-flight requests are left to finish; their results land in a
    /// closed channel and are discarded.
    pub fn stop(&self) {
        self.ticker.abort();
    }
}

impl Drop for HttpSource {
    fn drop(&mut self) {
        self.ticker.abort();
    }
}

/// Fetch both endpoints. A snapshot is produced only if both succeed, so a
/// tick never applies a partial update.
async fn fetch_snapshot(client: &dyn ApiClient) -> Result<FeedSnapshot, FetchError> {
    let readings = client.fetch_readings().await?;
    let alerts = client.fetch_alerts().await?;
    Ok(FeedSnapshot { readings, alerts })
}

impl DataSource for HttpSource {
    fn poll(&mut self) -> Option<FeedSnapshot> {
        loop {
            match self.receiver.try_recv() {
                Ok(outcome) => {
                    if outcome.seq <= self.last_applied {
                        // A slow response from an earlier tick arrived after
                        // a newer one was applied; drop it.
                        continue;
                    }
                    match outcome.result {
                        Ok(snapshot) => {
                            self.last_applied = outcome.seq;
                            self.last_error = None;
                            return Some(snapshot);
                        }
                        Err(e) => {
                            self.last_error = Some(e.to_string());
                            continue;
                        }
                    }
                }
                Err(mpsc::error::TryRecvError::Empty) => return None,
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    self.last_error = Some("poller stopped".to_string());
                    return None;
                }
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<String> {
        self.last_error.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicU32, Ordering};

    fn sample_reading(id: u64, topic: &str) -> Reading {
        Reading {
            id,
            topic: topic.to_string(),
            temperature: 22.0,
            humidity: 50.0,
            voltage: 3.3,
            timestamp: Utc.with_ymd_and_hms(2026, 8, 7, 10, 0, 0).unwrap(),
        }
    }

    #[derive(Debug)]
    struct StubClient {
        fail_alerts: bool,
        calls: AtomicU32,
    }

    impl StubClient {
        fn new(fail_alerts: bool) -> Self {
            Self {
                fail_alerts,
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl ApiClient for StubClient {
        async fn fetch_readings(&self) -> Result<Vec<Reading>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![sample_reading(1, "kitchen")])
        }

        async fn fetch_alerts(&self) -> Result<Vec<Alert>, FetchError> {
            if self.fail_alerts {
                Err(FetchError::Status(500))
            } else {
                Ok(Vec::new())
            }
        }

        fn endpoint(&self) -> &str {
            "stub"
        }
    }

    #[tokio::test]
    async fn test_poll_delivers_snapshot() {
        let client = Arc::new(StubClient::new(false));
        let mut source = HttpSource::spawn(client, Duration::from_millis(10));

        // Give the background task time to complete the first fetch
        tokio::time::sleep(Duration::from_millis(50)).await;

        let snapshot = source.poll();
        assert!(snapshot.is_some());
        assert_eq!(snapshot.unwrap().readings.len(), 1);
        assert!(source.error().is_none());
    }

    #[tokio::test]
    async fn test_failed_tick_sets_error_and_yields_nothing() {
        let client = Arc::new(StubClient::new(true));
        let mut source = HttpSource::spawn(client, Duration::from_millis(10));

        tokio::time::sleep(Duration::from_millis(50)).await;

        // The alerts fetch fails, so no partial snapshot is produced
        assert!(source.poll().is_none());
        let err = source.error();
        assert!(err.is_some());
        assert!(err.unwrap().contains("500"));
    }

    #[tokio::test]
    async fn test_stop_cancels_schedule() {
        let client = Arc::new(StubClient::new(false));
        let source = HttpSource::spawn(Arc::clone(&client) as Arc<dyn ApiClient>, Duration::from_millis(10));

        tokio::time::sleep(Duration::from_millis(30)).await;
        source.stop();

        // Let any in-flight fetch settle before sampling the call count
        tokio::time::sleep(Duration::from_millis(30)).await;
        let calls_after_stop = client.calls.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(client.calls.load(Ordering::SeqCst), calls_after_stop);
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let (tx, rx) = mpsc::channel(16);
        let mut source = HttpSource {
            receiver: rx,
            description: "test".to_string(),
            last_applied: 0,
            last_error: None,
            ticker: tokio::spawn(async {}),
        };

        let newer = FeedSnapshot {
            readings: vec![sample_reading(2, "garage")],
            alerts: Vec::new(),
        };
        let older = FeedSnapshot {
            readings: vec![sample_reading(1, "kitchen")],
            alerts: Vec::new(),
        };

        // Fetch #2 overtakes fetch #1 on the wire
        tx.send(FetchOutcome { seq: 2, result: Ok(newer) }).await.unwrap();
        tx.send(FetchOutcome { seq: 1, result: Ok(older) }).await.unwrap();

        let applied = source.poll().unwrap();
        assert_eq!(applied.readings[0].id, 2);

        // The late response from the earlier tick must not surface
        assert!(source.poll().is_none());
    }

    #[tokio::test]
    async fn test_error_cleared_by_later_success() {
        let (tx, rx) = mpsc::channel(16);
        let mut source = HttpSource {
            receiver: rx,
            description: "test".to_string(),
            last_applied: 0,
            last_error: None,
            ticker: tokio::spawn(async {}),
        };

        tx.send(FetchOutcome {
            seq: 1,
            result: Err(FetchError::Transport("connection refused".to_string())),
        })
        .await
        .unwrap();
        tx.send(FetchOutcome {
            seq: 2,
            result: Ok(FeedSnapshot::default()),
        })
        .await
        .unwrap();

        // The failure is recorded, then superseded by the success
        assert!(source.poll().is_some());
        assert!(source.error().is_none());
    }

    #[test]
    fn test_rest_client_trims_trailing_slash() {
        let client = RestClient::new("http://127.0.0.1:8000/");
        assert_eq!(client.endpoint(), "http://127.0.0.1:8000");
    }
}
