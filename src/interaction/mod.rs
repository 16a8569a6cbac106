use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{datetime_to_unix_seconds, parse_timestamp};

const RANGE_KEY: &str = "xaxis.range";
const LEFT_EDGE_KEY: &str = "xaxis.range[0]";
const RIGHT_EDGE_KEY: &str = "xaxis.range[1]";

/// Typed pan notification emitted by a plotting surface.
///
/// Edges are unix seconds. A notification raised by a value-axis interaction
/// carries no time-axis edges at all.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PanEvent {
    pub left_edge: Option<f64>,
    /// Reported for completeness; viewport handling ignores it.
    pub right_edge: Option<f64>,
}

impl PanEvent {
    #[must_use]
    pub fn range(left_edge: f64, right_edge: f64) -> Self {
        Self {
            left_edge: Some(left_edge),
            right_edge: Some(right_edge),
        }
    }

    #[must_use]
    pub fn left_edge(left_edge: f64) -> Self {
        Self {
            left_edge: Some(left_edge),
            right_edge: None,
        }
    }

    /// Event with no time-axis information.
    #[must_use]
    pub fn without_time_axis() -> Self {
        Self::default()
    }

    /// Decodes a raw relayout payload.
    ///
    /// Accepts split `xaxis.range[0]`/`xaxis.range[1]` keys or an
    /// `xaxis.range` pair. Edges may be numbers or date strings; anything
    /// else decodes to a missing edge.
    #[must_use]
    pub fn from_relayout(payload: &Value) -> Self {
        let Some(object) = payload.as_object() else {
            return Self::default();
        };

        if let Some(pair) = object.get(RANGE_KEY).and_then(Value::as_array) {
            return Self {
                left_edge: pair.first().and_then(decode_edge),
                right_edge: pair.get(1).and_then(decode_edge),
            };
        }

        Self {
            left_edge: object.get(LEFT_EDGE_KEY).and_then(decode_edge),
            right_edge: object.get(RIGHT_EDGE_KEY).and_then(decode_edge),
        }
    }

    #[must_use]
    pub fn has_time_axis(self) -> bool {
        self.left_edge.is_some()
    }
}

fn decode_edge(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64().filter(|seconds| seconds.is_finite()),
        Value::String(raw) => parse_timestamp(raw).ok().map(datetime_to_unix_seconds),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_split_keys_with_date_strings() {
        let event = PanEvent::from_relayout(&json!({
            "xaxis.range[0]": "2025-03-01 00:00:00",
            "xaxis.range[1]": "2025-03-02 12:30:00",
        }));
        assert_eq!(event.left_edge, Some(1_740_787_200.0));
        assert_eq!(event.right_edge, Some(1_740_787_200.0 + 36.5 * 3_600.0));
    }

    #[test]
    fn decodes_range_pair_with_numbers() {
        let event = PanEvent::from_relayout(&json!({ "xaxis.range": [100.0, 250] }));
        assert_eq!(event, PanEvent::range(100.0, 250.0));
    }

    #[test]
    fn value_axis_and_malformed_payloads_carry_no_left_edge() {
        for payload in [
            json!({ "yaxis.range[0]": 0, "yaxis.range[1]": 30 }),
            json!({ "xaxis.range[0]": "not a date" }),
            json!({ "xaxis.range[0]": true }),
            json!({ "xaxis.autorange": true }),
            json!(["xaxis.range[0]", 5]),
            Value::Null,
        ] {
            assert!(!PanEvent::from_relayout(&payload).has_time_axis(), "{payload}");
        }
    }
}
