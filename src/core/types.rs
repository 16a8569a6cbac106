use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::datetime_to_unix_seconds;
use crate::error::{ForecastError, ForecastResult};

/// Selected location in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> ForecastResult<Self> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(ForecastError::InvalidPoint(
                "latitude and longitude must be numeric".to_owned(),
            ));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(ForecastError::InvalidPoint(format!(
                "latitude {lat} is outside [-90, 90]"
            )));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(ForecastError::InvalidPoint(format!(
                "longitude {lon} is outside [-180, 180]"
            )));
        }
        Ok(Self { lat, lon })
    }

    /// Parses raw form input, e.g. the text of two coordinate fields.
    pub fn parse(lat: &str, lon: &str) -> ForecastResult<Self> {
        let lat = parse_coordinate(lat, "latitude")?;
        let lon = parse_coordinate(lon, "longitude")?;
        Self::new(lat, lon)
    }

    #[must_use]
    pub fn display_label(self) -> String {
        format!("{:.5}, {:.5}", self.lat, self.lon)
    }
}

fn parse_coordinate(raw: &str, name: &str) -> ForecastResult<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ForecastError::InvalidPoint(format!("{name} is missing")));
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| ForecastError::InvalidPoint(format!("{name} `{trimmed}` is not a number")))
}

/// Aligned per-timestamp forecast fields for one point and horizon.
///
/// All vectors share one index. Timestamps are strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSeries {
    timestamps: Vec<DateTime<Utc>>,
    primary: Vec<f64>,
    bound: Vec<f64>,
    categorical: Vec<Option<f64>>,
    unit: Option<String>,
}

impl ForecastSeries {
    pub fn new(
        timestamps: Vec<DateTime<Utc>>,
        primary: Vec<f64>,
        bound: Vec<f64>,
        categorical: Vec<Option<f64>>,
    ) -> ForecastResult<Self> {
        let len = timestamps.len();
        for (name, field_len) in [
            ("primary", primary.len()),
            ("bound", bound.len()),
            ("categorical", categorical.len()),
        ] {
            if field_len != len {
                return Err(ForecastError::InvalidData(format!(
                    "{name} has {field_len} values but there are {len} timestamps"
                )));
            }
        }

        if let Some(index) = timestamps.windows(2).position(|pair| pair[1] <= pair[0]) {
            return Err(ForecastError::InvalidData(format!(
                "timestamps must be strictly increasing (index {})",
                index + 1
            )));
        }
        if primary.iter().chain(&bound).any(|value| !value.is_finite()) {
            return Err(ForecastError::InvalidData(
                "primary and bound values must be finite".to_owned(),
            ));
        }

        let categorical = categorical
            .into_iter()
            .map(|value| value.filter(|v| v.is_finite()))
            .collect();

        Ok(Self {
            timestamps,
            primary,
            bound,
            categorical,
            unit: None,
        })
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    #[must_use]
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    #[must_use]
    pub fn primary(&self) -> &[f64] {
        &self.primary
    }

    #[must_use]
    pub fn bound(&self) -> &[f64] {
        &self.bound
    }

    #[must_use]
    pub fn categorical(&self) -> &[Option<f64>] {
        &self.categorical
    }

    #[must_use]
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    #[must_use]
    pub fn first_timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamps.first().copied()
    }

    /// Timestamps as unix seconds, the time-axis coordinate space.
    #[must_use]
    pub fn times_unix(&self) -> Vec<f64> {
        self.timestamps
            .iter()
            .copied()
            .map(datetime_to_unix_seconds)
            .collect()
    }

    /// Upward whisker length per sample, clamped so inverted bounds collapse to zero.
    #[must_use]
    pub fn uncertainty(&self) -> Vec<f64> {
        self.primary
            .iter()
            .zip(&self.bound)
            .map(|(primary, bound)| (bound - primary).max(0.0))
            .collect()
    }

    /// Keeps at most the first `count` samples.
    #[must_use]
    pub fn truncated(mut self, count: usize) -> Self {
        self.timestamps.truncate(count);
        self.primary.truncate(count);
        self.bound.truncate(count);
        self.categorical.truncate(count);
        self
    }
}
