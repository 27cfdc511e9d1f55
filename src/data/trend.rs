//! Chart series extraction for the overview trend chart.

use crate::source::Reading;

/// How many of the newest readings feed the trend chart.
const WINDOW: usize = 15;

/// Temperature and humidity series over the newest readings, in
/// chronological order (the feed arrives most-recent-first, so the window
/// is taken from the front and reversed).
///
/// Points are `(index, value)` pairs ready for a line chart.
#[derive(Debug, Clone, Default)]
pub struct TrendSeries {
    pub temperature: Vec<(f64, f64)>,
    pub humidity: Vec<(f64, f64)>,
}

impl TrendSeries {
    /// Build the series from the raw readings collection.
    pub fn from_readings(readings: &[Reading]) -> Self {
        let window: Vec<&Reading> = readings.iter().take(WINDOW).rev().collect();

        let mut temperature = Vec::with_capacity(window.len());
        let mut humidity = Vec::with_capacity(window.len());
        for (i, reading) in window.iter().enumerate() {
            temperature.push((i as f64, reading.temperature));
            humidity.push((i as f64, reading.humidity));
        }

        Self {
            temperature,
            humidity,
        }
    }

    pub fn len(&self) -> usize {
        self.temperature.len()
    }

    pub fn is_empty(&self) -> bool {
        self.temperature.is_empty()
    }

    /// X axis bounds covering every point.
    pub fn x_bounds(&self) -> [f64; 2] {
        [0.0, self.len().saturating_sub(1).max(1) as f64]
    }

    /// Y axis bounds covering both series, with a small margin so the
    /// lines never sit on the chart border.
    pub fn y_bounds(&self) -> [f64; 2] {
        let values = self.temperature.iter().chain(self.humidity.iter()).map(|&(_, y)| y);

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for value in values {
            min = min.min(value);
            max = max.max(value);
        }

        if min.is_infinite() {
            return [0.0, 1.0];
        }
        [min - 1.0, max + 1.0]
    }
}
