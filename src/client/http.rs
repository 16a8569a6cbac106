use std::time::Duration;

use tracing::{debug, warn};

use crate::core::ForecastSeries;
use crate::error::{ForecastError, ForecastResult};

use super::{ForecastClient, ForecastRequest, ResponseFields, decode_forecast_response};

/// Blocking JSON-over-HTTP forecast client.
#[derive(Debug, Clone)]
pub struct HttpForecastClient {
    client: reqwest::blocking::Client,
    endpoint: String,
    fields: ResponseFields,
}

impl HttpForecastClient {
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Duration,
        fields: ResponseFields,
    ) -> ForecastResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ForecastError::Transport(format!("http client error: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            fields,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ForecastClient for HttpForecastClient {
    fn fetch(&self, request: &ForecastRequest) -> ForecastResult<ForecastSeries> {
        debug!(
            endpoint = %self.endpoint,
            lat = request.lat,
            lon = request.lon,
            hours = request.hours,
            "requesting forecast"
        );
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .map_err(|e| {
                warn!(error = %e, "forecast request failed");
                ForecastError::Transport(format!("forecast request error: {e}"))
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| ForecastError::Transport(format!("forecast body read error: {e}")))?;
        decode_forecast_response(status, &body, &self.fields, request.hours)
    }
}
