mod series_encoder;
mod session;
mod session_config;
mod viewport_controller;

pub use series_encoder::{SeriesEncoder, format_categorical};
pub use session::{FETCH_BUSY_LABEL, FETCH_LABEL, FetchControl, ForecastSession, NO_DATA_MESSAGE};
pub use session_config::{EncoderStyle, SessionConfig};
pub use viewport_controller::ViewportController;
