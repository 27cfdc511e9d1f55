//! Topic derivation and stat-card warn limits.

use std::collections::HashSet;

use crate::source::Reading;

/// Warn limits for the overview stat cards.
///
/// A latest reading above one of these limits renders its card in the
/// alert color. These are display hints only - actual alert computation
/// happens server-side.
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    /// Temperature limit in degrees Celsius.
    pub temperature_warn: f64,
    /// Relative humidity limit in percent.
    pub humidity_warn: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            temperature_warn: 40.0,
            humidity_warn: 80.0,
        }
    }
}

/// Distinct topic values in first-observed order.
///
/// This is the choice list for the topic filter; the caller prepends the
/// "all topics" sentinel.
pub fn unique_topics(readings: &[Reading]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut topics = Vec::new();
    for reading in readings {
        if seen.insert(reading.topic.as_str()) {
            topics.push(reading.topic.clone());
        }
    }
    topics
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn reading(id: u64, topic: &str) -> Reading {
        Reading {
            id,
            topic: topic.to_string(),
            temperature: 20.0,
            humidity: 50.0,
            voltage: 3.3,
            timestamp: Utc.with_ymd_and_hms(2026, 8, 7, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_unique_topics_dedup_preserves_order() {
        let readings = vec![
            reading(3, "kitchen"),
            reading(2, "garage"),
            reading(1, "kitchen"),
        ];
        assert_eq!(unique_topics(&readings), vec!["kitchen", "garage"]);
    }

    #[test]
    fn test_unique_topics_empty() {
        assert!(unique_topics(&[]).is_empty());
    }
}
