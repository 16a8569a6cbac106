//! Forecast retrieval contract.
//!
//! The endpoint takes `{ lat, lon, hours }` and answers with aligned arrays
//! keyed by configurable field names. Failures carry an optional
//! `{ error }` body.

#[cfg(feature = "http-client")]
mod http;

#[cfg(feature = "http-client")]
pub use http::HttpForecastClient;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::core::{ForecastSeries, GeoPoint, parse_timestamp};
use crate::error::{ForecastError, ForecastResult};

/// Body of a forecast request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub lat: f64,
    pub lon: f64,
    pub hours: u32,
}

impl ForecastRequest {
    #[must_use]
    pub fn new(point: GeoPoint, hours: u32) -> Self {
        Self {
            lat: point.lat,
            lon: point.lon,
            hours,
        }
    }
}

/// Names of the aligned response arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseFields {
    pub time: String,
    pub primary: String,
    pub categorical: String,
    pub bound: String,
}

impl Default for ResponseFields {
    fn default() -> Self {
        Self {
            time: "time".to_owned(),
            primary: "wind_speed".to_owned(),
            categorical: "wind_dir".to_owned(),
            bound: "wind_gust".to_owned(),
        }
    }
}

/// Source of forecast series for a point and horizon.
pub trait ForecastClient {
    fn fetch(&self, request: &ForecastRequest) -> ForecastResult<ForecastSeries>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Turns a raw endpoint answer into a series or a request error.
///
/// The series is cut to the first `hours` samples (at least one).
pub fn decode_forecast_response(
    status: u16,
    body: &str,
    fields: &ResponseFields,
    hours: u32,
) -> ForecastResult<ForecastSeries> {
    if !(200..300).contains(&status) {
        return Err(ForecastError::Request {
            status,
            message: failure_message(status, body),
        });
    }

    let payload: Value = serde_json::from_str(body)
        .map_err(|e| ForecastError::InvalidData(format!("forecast body is not json: {e}")))?;
    let object = payload.as_object().ok_or_else(|| {
        ForecastError::InvalidData("forecast body must be a json object".to_owned())
    })?;

    let timestamps = field_array(object, &fields.time)?
        .iter()
        .map(|value| {
            value
                .as_str()
                .ok_or_else(|| {
                    ForecastError::InvalidData(format!("`{}` entries must be strings", fields.time))
                })
                .and_then(parse_timestamp)
        })
        .collect::<ForecastResult<Vec<_>>>()?;
    let primary = numeric_array(object, &fields.primary)?;
    let bound = numeric_array(object, &fields.bound)?;
    let categorical = field_array(object, &fields.categorical)?
        .iter()
        .map(Value::as_f64)
        .collect();

    let mut series = ForecastSeries::new(timestamps, primary, bound, categorical)?
        .truncated(hours.max(1) as usize);
    if let Some(unit) = object
        .get("meta")
        .and_then(|meta| meta.get("unit"))
        .and_then(Value::as_str)
    {
        series = series.with_unit(unit);
    }

    debug!(samples = series.len(), "decoded forecast response");
    Ok(series)
}

/// User-facing message for a non-success response.
#[must_use]
pub fn failure_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.error)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("Request failed ({status})"))
}

fn field_array<'a>(object: &'a Map<String, Value>, name: &str) -> ForecastResult<&'a [Value]> {
    object
        .get(name)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| ForecastError::InvalidData(format!("missing array field `{name}`")))
}

fn numeric_array(object: &Map<String, Value>, name: &str) -> ForecastResult<Vec<f64>> {
    field_array(object, name)?
        .iter()
        .enumerate()
        .map(|(index, value)| {
            value.as_f64().ok_or_else(|| {
                ForecastError::InvalidData(format!("`{name}[{index}]` must be a number"))
            })
        })
        .collect()
}
