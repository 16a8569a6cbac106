use tracing::{debug, trace};

use crate::core::{ForecastSeries, TimeWindow, hours_to_seconds};
use crate::error::{ForecastError, ForecastResult};
use crate::interaction::PanEvent;
use crate::render::LayoutUpdate;

/// Keeps the visible time range at a fixed width while the user pans.
///
/// The surface reports whatever range a drag produced; only its left edge is
/// used; the right edge is recomputed from the window duration.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportController {
    window_duration: f64,
    window: Option<TimeWindow>,
}

impl ViewportController {
    /// Creates an unbound controller with a window width in hours.
    pub fn new(window_hours: f64) -> ForecastResult<Self> {
        if !window_hours.is_finite() || window_hours <= 0.0 {
            return Err(ForecastError::InvalidData(
                "viewport window hours must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self {
            window_duration: hours_to_seconds(window_hours),
            window: None,
        })
    }

    /// Window width in seconds.
    #[must_use]
    pub fn window_duration(&self) -> f64 {
        self.window_duration
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.window.is_some()
    }

    /// Anchors a fresh window at the first sample, discarding any prior state.
    pub fn bind(&mut self, series: &ForecastSeries) -> ForecastResult<()> {
        let Some(&first) = series.times_unix().first() else {
            return Err(ForecastError::EmptySeries);
        };
        self.window = Some(TimeWindow::new(first, self.window_duration)?);
        debug!(window_start = first, "viewport bound to new series");
        Ok(())
    }

    pub fn unbind(&mut self) {
        self.window = None;
    }

    #[must_use]
    pub fn window(&self) -> Option<TimeWindow> {
        self.window
    }

    #[must_use]
    pub fn visible_range(&self) -> Option<(f64, f64)> {
        self.window.map(TimeWindow::visible_range)
    }

    /// Handles a pan notification and returns the corrective layout command.
    ///
    /// Returns `None` when the controller is unbound or the event has no
    /// usable left edge; the window is left where it was.
    pub fn on_pan(&mut self, event: &PanEvent) -> Option<LayoutUpdate> {
        let window = self.window.as_mut()?;
        let Some(left_edge) = event.left_edge else {
            trace!("pan notification without time-axis edge ignored");
            return None;
        };
        if window.move_start_to(left_edge).is_err() {
            trace!(left_edge, "non-finite pan edge ignored");
            return None;
        }

        let (start, end) = window.visible_range();
        trace!(
            start,
            end,
            proposed_end = ?event.right_edge,
            "viewport re-clamped after pan"
        );
        Some(LayoutUpdate::time_range(start, end))
    }
}
