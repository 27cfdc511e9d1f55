// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # sensorwatch
//!
//! A terminal dashboard and library for monitoring IoT sensor telemetry.
//!
//! This crate polls a REST backend for sensor readings and
//! threshold-violation alerts and displays them in an interactive
//! terminal UI: an overview with a live trend chart, a filterable and
//! paginated history table, and an acknowledgeable alert list with toast
//! notifications for newly arrived violations.
//!
//! ## Architecture
//!
//! The crate is organized into four main modules:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │(derivation)   │(rendering)   │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── HttpSource | ChannelSource                 │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state - the fetched collections, filters,
//!   pagination, alert acknowledgement, and the toast queue
//! - **[`source`]**: Data source abstraction ([`DataSource`] trait) with a
//!   polling HTTP implementation and a channel-based one for embedding
//! - **[`data`]**: Pure derivation helpers - pagination arithmetic, topic
//!   de-duplication, trend-series extraction
//! - **[`ui`]**: Terminal rendering using ratatui - stat cards, trend
//!   chart, tables, toast and help overlays, theme support
//!
//! ## Behavior notes
//!
//! - Each poll's payload fully replaces the held collections; there is no
//!   client-side merging across polls.
//! - Acknowledging an alert is local-only. The backend is never informed,
//!   so an alert stays acknowledged only until the next poll that still
//!   reports it.
//! - The new-alert toast fires when the alert count grows between polls;
//!   it is deliberately suppressed on the first fetch.
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Poll the default local backend every 3 seconds
//! sensorwatch
//!
//! # Point at another backend, slower cadence
//! sensorwatch --url http://sensors.local:9000 --refresh 10
//!
//! # One-shot snapshot export, no TUI
//! sensorwatch --export snapshot.json
//! ```
//!
//! ### As a library with a channel source
//!
//! ```
//! use sensorwatch::{App, ChannelSource, Thresholds};
//!
//! // Create a channel for pushing snapshots
//! let (tx, source) = ChannelSource::create("synthetic");
//!
//! // Create the app
//! let app = App::new(Box::new(source), Thresholds::default());
//! ```
//!
//! ### As a library with the HTTP source
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use sensorwatch::{App, HttpSource, RestClient, Thresholds};
//!
//! # tokio_test::block_on(async {
//! let client = Arc::new(RestClient::new("http://127.0.0.1:8000"));
//! let source = HttpSource::spawn(client, Duration::from_secs(3));
//! let app = App::new(Box::new(source), Thresholds::default());
//! # });
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, Toast, ToastKind, View};
pub use config::AppConfig;
pub use data::{PageView, Thresholds, TrendSeries, PAGE_SIZE};
pub use source::{
    Alert, ApiClient, ChannelSource, DataSource, FeedSnapshot, FetchError, HttpSource, Reading,
    RestClient,
};
