use thiserror::Error;

pub type ForecastResult<T> = Result<T, ForecastError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ForecastError {
    #[error("invalid point: {0}")]
    InvalidPoint(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("forecast series is empty")]
    EmptySeries,

    /// Non-success response. Displays the server-provided message verbatim.
    #[error("{message}")]
    Request { status: u16, message: String },

    #[error("{0}")]
    Transport(String),

    #[error("a forecast request is already in flight")]
    Busy,
}

impl ForecastError {
    /// Text shown in the blocking user notification.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptySeries => "No forecast data for this location".to_owned(),
            other => other.to_string(),
        }
    }

    #[must_use]
    pub fn is_empty_series(&self) -> bool {
        matches!(self, Self::EmptySeries)
    }
}
