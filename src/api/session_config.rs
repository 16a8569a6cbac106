use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::client::ResponseFields;
use crate::error::{ForecastError, ForecastResult};

/// Visual parameters for encoded charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderStyle {
    /// Bottom share of plot height reserved for the categorical text row.
    pub annotation_band: f64,
    /// Empty share between the text row and the bars.
    pub band_gap: f64,
    /// Added above the largest bound to set the fixed value range.
    pub value_headroom: f64,
    pub bar_width_secs: f64,
    pub primary_name: String,
    pub annotation_name: String,
    pub value_axis_title: String,
    pub annotation_axis_title: String,
    pub colorbar_title: String,
}

impl Default for EncoderStyle {
    fn default() -> Self {
        Self {
            annotation_band: 0.15,
            band_gap: 0.03,
            value_headroom: 3.0,
            bar_width_secs: 1_728.0,
            primary_name: "Wind speed".to_owned(),
            annotation_name: "Wind direction".to_owned(),
            value_axis_title: "Knots".to_owned(),
            annotation_axis_title: "Wind Dir (°)".to_owned(),
            colorbar_title: "Wind Speed".to_owned(),
        }
    }
}

impl EncoderStyle {
    pub fn validate(&self) -> ForecastResult<()> {
        if !self.annotation_band.is_finite()
            || !self.band_gap.is_finite()
            || self.annotation_band <= 0.0
            || self.band_gap < 0.0
            || self.annotation_band + self.band_gap >= 1.0
        {
            return Err(ForecastError::InvalidData(
                "annotation band and gap must leave room for the value band".to_owned(),
            ));
        }
        if !self.value_headroom.is_finite() || self.value_headroom < 0.0 {
            return Err(ForecastError::InvalidData(
                "value headroom must be finite and >= 0".to_owned(),
            ));
        }
        if !self.bar_width_secs.is_finite() || self.bar_width_secs <= 0.0 {
            return Err(ForecastError::InvalidData(
                "bar width must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Session-wide settings.
///
/// The default window and the pan window are kept as two separate values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub endpoint: String,
    pub horizon_hours: u32,
    pub request_timeout_secs: u64,
    /// Width of the initial time-axis range.
    pub default_window_hours: f64,
    /// Width enforced after every pan.
    pub pan_window_hours: f64,
    pub fields: ResponseFields,
    pub encoder: EncoderStyle,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5000/api/forecast".to_owned(),
            horizon_hours: 120,
            request_timeout_secs: 30,
            default_window_hours: 36.0,
            pan_window_hours: 36.5,
            fields: ResponseFields::default(),
            encoder: EncoderStyle::default(),
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn with_horizon_hours(mut self, hours: u32) -> Self {
        self.horizon_hours = hours;
        self
    }

    #[must_use]
    pub fn with_windows(mut self, default_window_hours: f64, pan_window_hours: f64) -> Self {
        self.default_window_hours = default_window_hours;
        self.pan_window_hours = pan_window_hours;
        self
    }

    #[must_use]
    pub fn with_fields(mut self, fields: ResponseFields) -> Self {
        self.fields = fields;
        self
    }

    #[must_use]
    pub fn with_encoder_style(mut self, style: EncoderStyle) -> Self {
        self.encoder = style;
        self
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> ForecastResult<()> {
        if self.horizon_hours == 0 {
            return Err(ForecastError::InvalidData(
                "forecast horizon must be at least one hour".to_owned(),
            ));
        }
        for (name, hours) in [
            ("default window", self.default_window_hours),
            ("pan window", self.pan_window_hours),
        ] {
            if !hours.is_finite() || hours <= 0.0 {
                return Err(ForecastError::InvalidData(format!(
                    "{name} hours must be finite and > 0"
                )));
            }
        }
        self.encoder.validate()
    }

    /// Parses and validates a JSON config document. Missing keys take defaults.
    pub fn from_json_str(input: &str) -> ForecastResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ForecastError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ForecastResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ForecastError::InvalidData(format!("failed to serialize config: {e}")))
    }
}
