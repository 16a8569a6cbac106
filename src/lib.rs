//! forecast-window: windowed chart controller for point forecasts.
//!
//! A forecast series is encoded into backend-agnostic chart primitives and
//! shown through a fixed-width time window that follows user panning instead
//! of free zooming.

pub mod api;
pub mod client;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ForecastSession, SeriesEncoder, SessionConfig, ViewportController};
pub use error::{ForecastError, ForecastResult};
