use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, ForecastResult};

/// Fixed-width visible time range.
///
/// Only `window_start` is stored; the end is always derived from the
/// duration so panning can move the window but never resize it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    window_start: f64,
    window_duration: f64,
}

impl TimeWindow {
    pub fn new(window_start: f64, window_duration: f64) -> ForecastResult<Self> {
        validate_start(window_start)?;
        if !window_duration.is_finite() || window_duration <= 0.0 {
            return Err(ForecastError::InvalidData(
                "window duration must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self {
            window_start,
            window_duration,
        })
    }

    #[must_use]
    pub fn window_start(self) -> f64 {
        self.window_start
    }

    #[must_use]
    pub fn window_end(self) -> f64 {
        self.window_start + self.window_duration
    }

    #[must_use]
    pub fn window_duration(self) -> f64 {
        self.window_duration
    }

    #[must_use]
    pub fn visible_range(self) -> (f64, f64) {
        (self.window_start, self.window_end())
    }

    /// Moves the left edge to `start`, keeping the width.
    pub fn move_start_to(&mut self, start: f64) -> ForecastResult<()> {
        validate_start(start)?;
        self.window_start = start;
        Ok(())
    }
}

fn validate_start(start: f64) -> ForecastResult<()> {
    if !start.is_finite() {
        return Err(ForecastError::InvalidData(
            "window start must be finite".to_owned(),
        ));
    }
    Ok(())
}
