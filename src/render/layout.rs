use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::unix_seconds_to_datetime;
use crate::error::{ForecastError, ForecastResult};

/// Default pointer drag behavior of the plotting surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragMode {
    Pan,
    Zoom,
}

/// Shared horizontal time axis. Ranges are unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeAxisLayout {
    pub range: (f64, f64),
    /// `false` lets the user pan the axis.
    pub fixed_range: bool,
}

/// One vertical value band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueAxisLayout {
    pub title: String,
    /// Vertical share of the plot area, `0` is the bottom edge.
    pub domain: (f64, f64),
    pub range: (f64, f64),
    pub fixed_range: bool,
    pub show_tick_labels: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorBarLayout {
    pub title: String,
    pub domain: (f64, f64),
}

/// Full layout for one rendered series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub time_axis: TimeAxisLayout,
    pub value_axis: ValueAxisLayout,
    pub annotation_axis: ValueAxisLayout,
    pub color_bar: ColorBarLayout,
    pub drag_mode: DragMode,
}

impl ChartLayout {
    pub fn validate(&self) -> ForecastResult<()> {
        validate_range("time axis range", self.time_axis.range)?;
        for axis in [&self.value_axis, &self.annotation_axis] {
            validate_range("value axis range", axis.range)?;
            let (bottom, top) = axis.domain;
            if !(0.0..=1.0).contains(&bottom) || !(0.0..=1.0).contains(&top) || bottom >= top {
                return Err(ForecastError::InvalidData(format!(
                    "axis `{}` domain must be ordered within [0, 1]",
                    axis.title
                )));
            }
        }
        if self.value_axis.domain.0 < self.annotation_axis.domain.1 {
            return Err(ForecastError::InvalidData(
                "annotation band must sit below the value band".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn apply(&mut self, update: &LayoutUpdate) {
        if let Some(range) = update.time_range {
            self.time_axis.range = range;
        }
    }
}

/// Corrective re-layout command sent back to the plotting surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutUpdate {
    pub time_range: Option<(f64, f64)>,
}

impl LayoutUpdate {
    #[must_use]
    pub fn time_range(start: f64, end: f64) -> Self {
        Self {
            time_range: Some((start, end)),
        }
    }

    /// Flat relayout payload keyed by axis path, with ISO-8601 edges.
    #[must_use]
    pub fn to_relayout_payload(&self) -> IndexMap<String, Value> {
        let mut payload = IndexMap::new();
        if let Some((start, end)) = self.time_range {
            payload.insert(
                "xaxis.range".to_owned(),
                Value::Array(vec![iso_or_number(start), iso_or_number(end)]),
            );
        }
        payload
    }
}

fn iso_or_number(seconds: f64) -> Value {
    match unix_seconds_to_datetime(seconds) {
        Some(time) => Value::String(time.to_rfc3339()),
        None => serde_json::json!(seconds),
    }
}

fn validate_range(name: &str, (start, end): (f64, f64)) -> ForecastResult<()> {
    if !start.is_finite() || !end.is_finite() || start >= end {
        return Err(ForecastError::InvalidData(format!(
            "{name} must be finite and increasing"
        )));
    }
    Ok(())
}
