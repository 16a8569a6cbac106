use std::cell::{Cell, RefCell};

use forecast_window::api::{FETCH_LABEL, ForecastSession, NO_DATA_MESSAGE, SessionConfig};
use forecast_window::client::{
    ForecastClient, ForecastRequest, ResponseFields, decode_forecast_response,
};
use forecast_window::core::{ForecastSeries, GeoPoint, datetime_to_unix_seconds, parse_timestamp};
use forecast_window::interaction::PanEvent;
use forecast_window::render::NullSurface;
use forecast_window::{ForecastError, ForecastResult};
use serde_json::json;

const HOUR: f64 = 3_600.0;

/// Answers every request with a fixed raw endpoint response.
struct ScriptedEndpoint {
    status: u16,
    body: String,
    calls: Cell<usize>,
    last_request: RefCell<Option<ForecastRequest>>,
}

impl ScriptedEndpoint {
    fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            calls: Cell::new(0),
            last_request: RefCell::new(None),
        }
    }
}

impl ForecastClient for ScriptedEndpoint {
    fn fetch(&self, request: &ForecastRequest) -> ForecastResult<ForecastSeries> {
        self.calls.set(self.calls.get() + 1);
        *self.last_request.borrow_mut() = Some(*request);
        decode_forecast_response(self.status, &self.body, &ResponseFields::default(), request.hours)
    }
}

fn hourly_body(count: usize) -> String {
    let time: Vec<String> = (0..count)
        .map(|i| format!("2025-03-{:02}T{:02}:00", 1 + i / 24, i % 24))
        .collect();
    json!({
        "time": time,
        "wind_speed": vec![8.0; count],
        "wind_dir": vec![187.4; count],
        "wind_gust": vec![12.0; count],
    })
    .to_string()
}

fn first_stamp() -> f64 {
    datetime_to_unix_seconds(parse_timestamp("2025-03-01T00:00").expect("stamp"))
}

fn session(endpoint: ScriptedEndpoint) -> ForecastSession<ScriptedEndpoint, NullSurface> {
    ForecastSession::new(endpoint, NullSurface::default(), SessionConfig::default())
        .expect("session")
}

#[test]
fn selecting_a_point_then_requesting_shows_default_window() {
    let mut session = session(ScriptedEndpoint::new(200, hourly_body(120)));
    let label = session.select_point(GeoPoint::new(42.35656, -71.08575).expect("point"));
    assert_eq!(label, "42.35656, -71.08575");

    session.request_forecast().expect("request");

    let request = session.client().last_request.borrow().expect("request sent");
    assert_eq!(request.hours, 120);
    assert_eq!(request.lat, 42.35656);

    let start = first_stamp();
    assert_eq!(
        session.surface().visible_time_range(),
        Some((start, start + 36.0 * HOUR))
    );
    assert_eq!(
        session.viewport().visible_range(),
        Some((start, start + 36.5 * HOUR))
    );
    assert_eq!(session.series().map(ForecastSeries::len), Some(120));
    assert_eq!(session.visible_sample_range(), Some(0..37));
    assert!(session.control().is_enabled());
    assert_eq!(session.notice(), None);
}

#[test]
fn failing_request_reports_server_message_and_restores_control() {
    let mut session = session(ScriptedEndpoint::new(500, r#"{"error":"upstream timeout"}"#));
    session.select_point(GeoPoint::new(42.35656, -71.08575).expect("point"));

    let err = session.request_forecast().expect_err("must fail");

    assert_eq!(err.user_message(), "upstream timeout");
    assert_eq!(session.notice(), Some("upstream timeout"));
    assert!(session.control().is_enabled());
    assert_eq!(session.control().label(), FETCH_LABEL);
    assert!(session.surface().last_chart.is_none());
    assert_eq!(session.surface().render_count, 0);
}

#[test]
fn missing_selection_skips_the_fetch() {
    let mut session = session(ScriptedEndpoint::new(200, hourly_body(3)));

    let err = session.request_forecast().expect_err("must fail");
    assert!(matches!(err, ForecastError::InvalidPoint(_)));
    assert_eq!(session.client().calls.get(), 0);
    assert!(session.notice().is_some());
}

#[test]
fn non_numeric_input_is_rejected_before_fetching() {
    let mut session = session(ScriptedEndpoint::new(200, hourly_body(3)));

    let err = session.select_point_input("north", "-71.0").expect_err("must fail");
    assert!(matches!(err, ForecastError::InvalidPoint(_)));
    assert!(session.select_point_input("", "-71.0").is_err());
    assert!(session.select_point_input("91", "0").is_err());
    assert_eq!(session.selected_point(), None);

    let point = session.select_point_input(" 42.5 ", "-71.25").expect("valid input");
    assert_eq!(session.selected_point(), Some(point));
    assert_eq!(session.client().calls.get(), 0);
}

#[test]
fn latest_selection_wins() {
    let mut session = session(ScriptedEndpoint::new(200, hourly_body(3)));
    session.select_point(GeoPoint::new(10.0, 10.0).expect("point"));
    session.select_point(GeoPoint::new(-33.9, 151.2).expect("point"));

    session.request_forecast().expect("request");
    let request = session.client().last_request.borrow().expect("request sent");
    assert_eq!((request.lat, request.lon), (-33.9, 151.2));
}

#[test]
fn pan_is_corrected_on_the_surface_before_returning() {
    let mut session = session(ScriptedEndpoint::new(200, hourly_body(120)));
    session.select_point(GeoPoint::new(0.0, 0.0).expect("point"));
    session.request_forecast().expect("request");

    let left = first_stamp() + 24.0 * HOUR;
    let update = session
        .handle_pan(&PanEvent::range(left, left + 2.0 * HOUR))
        .expect("pan")
        .expect("correction");

    assert_eq!(update.time_range, Some((left, left + 36.5 * HOUR)));
    assert_eq!(
        session.surface().visible_time_range(),
        Some((left, left + 36.5 * HOUR))
    );
    assert_eq!(session.surface().layout_updates.len(), 1);
}

#[test]
fn value_axis_relayout_leaves_window_alone() {
    let mut session = session(ScriptedEndpoint::new(200, hourly_body(48)));
    session.select_point(GeoPoint::new(0.0, 0.0).expect("point"));
    session.request_forecast().expect("request");
    let before = session.viewport().visible_range();

    let update = session
        .handle_relayout(&json!({ "yaxis.range[0]": 0, "yaxis.range[1]": 40 }))
        .expect("relayout");

    assert_eq!(update, None);
    assert_eq!(session.viewport().visible_range(), before);
    assert!(session.surface().layout_updates.is_empty());
}

#[test]
fn relayout_payload_with_date_strings_pans() {
    let mut session = session(ScriptedEndpoint::new(200, hourly_body(48)));
    session.select_point(GeoPoint::new(0.0, 0.0).expect("point"));
    session.request_forecast().expect("request");

    session
        .handle_relayout(&json!({
            "xaxis.range[0]": "2025-03-01 12:00:00",
            "xaxis.range[1]": "2025-03-01 13:00:00",
        }))
        .expect("relayout");

    let left = first_stamp() + 12.0 * HOUR;
    assert_eq!(session.viewport().visible_range(), Some((left, left + 36.5 * HOUR)));
    assert_eq!(session.visible_sample_range(), Some(12..48));
}

#[test]
fn empty_response_shows_no_data_state() {
    let empty = json!({ "time": [], "wind_speed": [], "wind_dir": [], "wind_gust": [] });
    let mut session = session(ScriptedEndpoint::new(200, empty.to_string()));
    session.select_point(GeoPoint::new(0.0, 0.0).expect("point"));

    let err = session.request_forecast().expect_err("must fail");

    assert!(err.is_empty_series());
    assert_eq!(session.surface().placeholder.as_deref(), Some(NO_DATA_MESSAGE));
    assert!(session.surface().last_chart.is_none());
    assert!(!session.viewport().is_bound());
    assert!(session.control().is_enabled());
    assert_eq!(session.handle_pan(&PanEvent::left_edge(0.0)).expect("pan"), None);
}

#[test]
fn new_series_replaces_previous_one_and_rebinds_viewport() {
    let mut session = session(ScriptedEndpoint::new(200, hourly_body(72)));
    session.select_point(GeoPoint::new(0.0, 0.0).expect("point"));
    session.request_forecast().expect("first");
    session
        .handle_pan(&PanEvent::left_edge(first_stamp() + 30.0 * HOUR))
        .expect("pan");

    session.request_forecast().expect("second");

    let start = first_stamp();
    assert_eq!(
        session.viewport().visible_range(),
        Some((start, start + 36.5 * HOUR))
    );
    assert_eq!(session.surface().render_count, 2);
    assert_eq!(session.client().calls.get(), 2);
}

#[test]
fn invalid_config_is_rejected() {
    let config = SessionConfig::default().with_windows(36.0, 0.0);
    let result = ForecastSession::new(
        ScriptedEndpoint::new(200, hourly_body(1)),
        NullSurface::default(),
        config,
    );
    assert!(result.is_err());
}
