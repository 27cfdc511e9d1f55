//! Example: feeding the dashboard via a channel
//!
//! This example demonstrates how to integrate sensorwatch into your own
//! application by sending snapshots through a channel instead of polling
//! the REST backend.
//!
//! This is useful when you want to:
//! - Bridge readings from a message queue or local bus
//! - Generate synthetic data for testing
//! - Replay captured telemetry
//!
//! # Usage
//!
//! ```bash
//! cargo run --example channel_feed
//! ```

use std::thread;
use std::time::Duration;

use chrono::Utc;

use sensorwatch::{Alert, ChannelSource, DataSource, FeedSnapshot, Reading};

fn main() {
    println!("Channel feed example");
    println!("Generating synthetic sensor data...\n");

    // Create a channel source - this returns both a sender and the source
    let (tx, mut source) = ChannelSource::create("synthetic-feed");

    // Spawn a thread to generate synthetic snapshots
    thread::spawn(move || {
        let mut counter = 0u64;
        let mut readings: Vec<Reading> = Vec::new();
        let mut alerts: Vec<Alert> = Vec::new();

        loop {
            counter += 1;

            // Newest entries go to the front, like the real backend
            let temperature = 21.0 + (counter % 25) as f64;
            readings.insert(
                0,
                Reading {
                    id: counter,
                    topic: if counter % 2 == 0 { "kitchen" } else { "garage" }.to_string(),
                    temperature,
                    humidity: 45.0 + (counter % 30) as f64,
                    voltage: 3.3,
                    timestamp: Utc::now(),
                },
            );

            // Simulate a server-side threshold violation now and then
            if temperature > 40.0 {
                alerts.insert(
                    0,
                    Alert {
                        id: counter,
                        topic: "kitchen".to_string(),
                        violated_key: "temperature".to_string(),
                        actual_value: temperature,
                        threshold_value: 40.0,
                        timestamp: Utc::now(),
                    },
                );
            }

            let snapshot = FeedSnapshot {
                readings: readings.clone(),
                alerts: alerts.clone(),
            };

            if tx.send(snapshot).is_err() {
                break; // Receiver dropped
            }

            thread::sleep(Duration::from_secs(1));
        }
    });

    // Poll the source in the main thread
    println!("Receiving snapshots (press Ctrl+C to stop):\n");

    loop {
        if let Some(snapshot) = source.poll() {
            println!(
                "Received snapshot: {} readings, {} alerts",
                snapshot.readings.len(),
                snapshot.alerts.len()
            );
            if let Some(latest) = snapshot.readings.first() {
                println!(
                    "  Latest: {} {:.1}°C {:.1}% {:.2}V",
                    latest.topic, latest.temperature, latest.humidity, latest.voltage
                );
            }
            if let Some(alert) = snapshot.alerts.first() {
                println!(
                    "  Newest alert: {} {} at {:.1} (limit {:.1})",
                    alert.topic, alert.violated_key, alert.actual_value, alert.threshold_value
                );
            }
            println!();
        }

        thread::sleep(Duration::from_millis(100));
    }
}
