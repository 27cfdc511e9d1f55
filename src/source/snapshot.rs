//! Wire types for the sensor feed.
//!
//! These types match the JSON payloads served by the ingestion backend's
//! `/data` and `/alerts` endpoints. They are the common format between the
//! backend producer and this dashboard consumer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One sensor sample as served by `GET /data`.
///
/// Immutable once fetched; the dashboard never modifies a reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Unique, server-assigned identifier. Used as the sort/display key.
    pub id: u64,
    /// Label identifying the originating sensor/device/room.
    pub topic: String,
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Supply voltage.
    pub voltage: f64,
    /// Server-assigned ingestion time.
    pub timestamp: DateTime<Utc>,
}

/// One threshold violation as served by `GET /alerts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Unique, server-assigned identifier.
    pub id: u64,
    /// Label identifying the originating sensor/device/room.
    pub topic: String,
    /// Name of the measured field that exceeded its limit.
    pub violated_key: String,
    /// The measured value that triggered the violation.
    pub actual_value: f64,
    /// The configured limit that was exceeded.
    pub threshold_value: f64,
    /// Server-assigned detection time.
    pub timestamp: DateTime<Utc>,
}

/// One successful poll's payload.
///
/// Both collections arrive most-recent-first (server-assigned order);
/// index 0 is the newest entry. Each snapshot fully replaces the one
/// before it on the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedSnapshot {
    pub readings: Vec<Reading>,
    pub alerts: Vec<Alert>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_reading() {
        let json = r#"{
            "id": 42,
            "topic": "kitchen",
            "temperature": 23.5,
            "humidity": 61.2,
            "voltage": 3.29,
            "timestamp": "2026-08-07T10:15:00Z"
        }"#;

        let reading: Reading = serde_json::from_str(json).unwrap();
        assert_eq!(reading.id, 42);
        assert_eq!(reading.topic, "kitchen");
        assert!((reading.temperature - 23.5).abs() < f64::EPSILON);
        assert!((reading.voltage - 3.29).abs() < f64::EPSILON);
    }

    #[test]
    fn test_deserialize_alert() {
        let json = r#"{
            "id": 7,
            "topic": "server-room",
            "violated_key": "temperature",
            "actual_value": 44.1,
            "threshold_value": 40.0,
            "timestamp": "2026-08-07T10:15:03Z"
        }"#;

        let alert: Alert = serde_json::from_str(json).unwrap();
        assert_eq!(alert.id, 7);
        assert_eq!(alert.violated_key, "temperature");
        assert!((alert.actual_value - 44.1).abs() < f64::EPSILON);
        assert!((alert.threshold_value - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let json = r#"{
            "readings": [
                {
                    "id": 2,
                    "topic": "garage",
                    "temperature": 19.0,
                    "humidity": 55.0,
                    "voltage": 3.3,
                    "timestamp": "2026-08-07T10:15:06Z"
                }
            ],
            "alerts": []
        }"#;

        let snapshot: FeedSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.readings.len(), 1);
        assert!(snapshot.alerts.is_empty());

        let back = serde_json::to_string(&snapshot).unwrap();
        let again: FeedSnapshot = serde_json::from_str(&back).unwrap();
        assert_eq!(again.readings, snapshot.readings);
    }
}
