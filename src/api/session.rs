use std::ops::Range;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::client::{ForecastClient, ForecastRequest};
use crate::core::{ForecastSeries, GeoPoint, samples_in_time_window};
use crate::error::{ForecastError, ForecastResult};
use crate::interaction::PanEvent;
use crate::render::{ChartSurface, LayoutUpdate};

use super::{SeriesEncoder, SessionConfig, ViewportController};

pub const FETCH_LABEL: &str = "Get forecast";
pub const FETCH_BUSY_LABEL: &str = "Loading…";
pub const NO_DATA_MESSAGE: &str = "No forecast data for this location";

/// State of the control that triggers a forecast request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchControl {
    enabled: bool,
    label: &'static str,
}

impl Default for FetchControl {
    fn default() -> Self {
        Self {
            enabled: true,
            label: FETCH_LABEL,
        }
    }
}

impl FetchControl {
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    fn begin(&mut self) -> ForecastResult<()> {
        if !self.enabled {
            return Err(ForecastError::Busy);
        }
        self.enabled = false;
        self.label = FETCH_BUSY_LABEL;
        Ok(())
    }

    fn finish(&mut self) {
        *self = Self::default();
    }
}

/// One interactive page session: selection, request gate, chart and viewport.
///
/// At most one forecast request is in flight; the fetch control is disabled
/// for its duration and always restored afterwards.
pub struct ForecastSession<C: ForecastClient, S: ChartSurface> {
    config: SessionConfig,
    client: C,
    surface: S,
    encoder: SeriesEncoder,
    viewport: ViewportController,
    selection: Option<GeoPoint>,
    control: FetchControl,
    series: Option<ForecastSeries>,
    notice: Option<String>,
}

impl<C: ForecastClient, S: ChartSurface> ForecastSession<C, S> {
    pub fn new(client: C, surface: S, config: SessionConfig) -> ForecastResult<Self> {
        config.validate()?;
        let encoder = SeriesEncoder::from_config(&config)?;
        let viewport = ViewportController::new(config.pan_window_hours)?;

        Ok(Self {
            config,
            client,
            surface,
            encoder,
            viewport,
            selection: None,
            control: FetchControl::default(),
            series: None,
            notice: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    #[must_use]
    pub fn control(&self) -> &FetchControl {
        &self.control
    }

    #[must_use]
    pub fn series(&self) -> Option<&ForecastSeries> {
        self.series.as_ref()
    }

    /// Message of the last failed request, cleared by the next success.
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    #[must_use]
    pub fn selected_point(&self) -> Option<GeoPoint> {
        self.selection
    }

    /// Replaces the current selection and returns its display label.
    pub fn select_point(&mut self, point: GeoPoint) -> String {
        self.selection = Some(point);
        debug!(lat = point.lat, lon = point.lon, "point selected");
        point.display_label()
    }

    /// Selects a point from raw coordinate input.
    pub fn select_point_input(&mut self, lat: &str, lon: &str) -> ForecastResult<GeoPoint> {
        let point = GeoPoint::parse(lat, lon).inspect_err(|err| {
            self.notice = Some(err.user_message());
        })?;
        self.select_point(point);
        Ok(point)
    }

    /// Fetches, encodes and renders a forecast for the selected point.
    ///
    /// Any failure leaves the previously rendered chart untouched, except an
    /// empty response which replaces it with a "no data" placeholder.
    pub fn request_forecast(&mut self) -> ForecastResult<()> {
        let Some(point) = self.selection else {
            let err = ForecastError::InvalidPoint("select a point on the map first".to_owned());
            self.notice = Some(err.user_message());
            return Err(err);
        };

        self.control.begin()?;
        let request = ForecastRequest::new(point, self.config.horizon_hours);
        let result = self
            .client
            .fetch(&request)
            .and_then(|series| self.present(series));
        self.control.finish();

        match &result {
            Ok(()) => {
                self.notice = None;
                info!(
                    lat = point.lat,
                    lon = point.lon,
                    samples = self.series.as_ref().map_or(0, ForecastSeries::len),
                    "forecast rendered"
                );
            }
            Err(err) => {
                warn!(error = %err, "forecast request failed");
                self.notice = Some(err.user_message());
            }
        }
        result
    }

    fn present(&mut self, series: ForecastSeries) -> ForecastResult<()> {
        let chart = match self.encoder.encode(&series) {
            Ok(chart) => chart,
            Err(ForecastError::EmptySeries) => {
                self.series = None;
                self.viewport.unbind();
                self.surface.show_placeholder(NO_DATA_MESSAGE)?;
                return Err(ForecastError::EmptySeries);
            }
            Err(err) => return Err(err),
        };

        self.surface.render(&chart)?;
        self.viewport.bind(&series)?;
        self.series = Some(series);
        Ok(())
    }

    /// Applies a pan notification and pushes the correction to the surface
    /// before returning.
    pub fn handle_pan(&mut self, event: &PanEvent) -> ForecastResult<Option<LayoutUpdate>> {
        let Some(update) = self.viewport.on_pan(event) else {
            return Ok(None);
        };
        self.surface.relayout(&update)?;
        Ok(Some(update))
    }

    /// Decodes a raw relayout payload from the surface and handles it as a pan.
    pub fn handle_relayout(&mut self, payload: &Value) -> ForecastResult<Option<LayoutUpdate>> {
        self.handle_pan(&PanEvent::from_relayout(payload))
    }

    /// Index range of samples inside the current window.
    #[must_use]
    pub fn visible_sample_range(&self) -> Option<Range<usize>> {
        let (start, end) = self.viewport.visible_range()?;
        let series = self.series.as_ref()?;
        Some(samples_in_time_window(&series.times_unix(), start, end))
    }
}
