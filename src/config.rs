//! Layered configuration.
//!
//! Built-in defaults, then an optional config file, then
//! `SENSORWATCH_`-prefixed environment variables. Explicit CLI flags are
//! applied on top by the binary.

use std::path::Path;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

/// Default backend location, matching the usual local ingestion setup.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Resolved configuration consumed by the binary.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Base URL of the ingestion backend.
    pub base_url: String,
    /// Poll interval in seconds.
    pub refresh_secs: u64,
    /// Temperature warn limit for the overview cards (°C).
    pub temperature_warn: f64,
    /// Humidity warn limit for the overview cards (%).
    pub humidity_warn: f64,
}

impl AppConfig {
    /// Load configuration from defaults, an optional file, and the
    /// environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("refresh_secs", 3_i64)?
            .set_default("temperature_warn", 40.0_f64)?
            .set_default("humidity_warn", 80.0_f64)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(Environment::with_prefix("SENSORWATCH"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
