use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, ForecastResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
        )
    }

    /// Linear blend, `t = 0` gives `self` and `t = 1` gives `other`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::rgba(
            self.red + (other.red - self.red) * t,
            self.green + (other.green - self.green) * t,
            self.blue + (other.blue - self.blue) * t,
            self.alpha + (other.alpha - self.alpha) * t,
        )
    }

    pub fn validate(self) -> ForecastResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ForecastError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Value axis a trace is plotted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueAxis {
    /// Main magnitude band.
    #[serde(rename = "y")]
    Primary,
    /// Bottom band holding the categorical text row.
    #[serde(rename = "y2")]
    Annotation,
}

/// Asymmetric error whiskers, one entry per bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorWhiskers {
    pub plus: Vec<f64>,
    pub minus: Vec<f64>,
    pub colors: Vec<Color>,
}

/// Bars positioned by time, with color and upward uncertainty whiskers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarTrace {
    pub name: String,
    pub axis: ValueAxis,
    /// Unix seconds.
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub bar_width_secs: f64,
    pub fill: Vec<Color>,
    pub color_domain: (f64, f64),
    pub whiskers: ErrorWhiskers,
    /// Auxiliary per-bar value shown on hover.
    pub custom_data: Vec<f64>,
    pub hover_labels: Vec<String>,
}

impl BarTrace {
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn validate(&self) -> ForecastResult<()> {
        let len = self.x.len();
        for (field, field_len) in [
            ("y", self.y.len()),
            ("fill", self.fill.len()),
            ("whiskers.plus", self.whiskers.plus.len()),
            ("whiskers.minus", self.whiskers.minus.len()),
            ("whiskers.colors", self.whiskers.colors.len()),
            ("custom_data", self.custom_data.len()),
            ("hover_labels", self.hover_labels.len()),
        ] {
            if field_len != len {
                return Err(ForecastError::InvalidData(format!(
                    "bar trace `{field}` length {field_len} does not match {len} bars"
                )));
            }
        }
        if self
            .x
            .iter()
            .chain(&self.y)
            .chain(&self.custom_data)
            .any(|value| !value.is_finite())
        {
            return Err(ForecastError::InvalidData(
                "bar coordinates must be finite".to_owned(),
            ));
        }
        if self
            .whiskers
            .plus
            .iter()
            .chain(&self.whiskers.minus)
            .any(|value| !value.is_finite() || *value < 0.0)
        {
            return Err(ForecastError::InvalidData(
                "whisker lengths must be finite and >= 0".to_owned(),
            ));
        }
        if !self.bar_width_secs.is_finite() || self.bar_width_secs <= 0.0 {
            return Err(ForecastError::InvalidData(
                "bar width must be finite and > 0".to_owned(),
            ));
        }
        for color in self.fill.iter().chain(&self.whiskers.colors) {
            color.validate()?;
        }
        Ok(())
    }
}

/// Row of text labels on a fixed vertical offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextTrace {
    pub name: String,
    pub axis: ValueAxis,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Empty strings are valid and render nothing.
    pub text: Vec<String>,
}

impl TextTrace {
    pub fn validate(&self) -> ForecastResult<()> {
        let len = self.x.len();
        if self.y.len() != len || self.text.len() != len {
            return Err(ForecastError::InvalidData(format!(
                "text trace lengths differ: x={len}, y={}, text={}",
                self.y.len(),
                self.text.len()
            )));
        }
        if self.x.iter().chain(&self.y).any(|value| !value.is_finite()) {
            return Err(ForecastError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}
