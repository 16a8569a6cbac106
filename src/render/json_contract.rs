use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, ForecastResult};
use crate::render::EncodedChart;

pub const ENCODED_CHART_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedChartJsonContractV1 {
    pub schema_version: u32,
    pub chart: EncodedChart,
}

impl EncodedChart {
    pub fn to_json_contract_v1_pretty(&self) -> ForecastResult<String> {
        let payload = EncodedChartJsonContractV1 {
            schema_version: ENCODED_CHART_JSON_SCHEMA_V1,
            chart: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ForecastError::InvalidData(format!("failed to serialize chart contract v1: {e}"))
        })
    }

    /// Accepts either a bare chart or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ForecastResult<Self> {
        if let Ok(chart) = serde_json::from_str::<EncodedChart>(input) {
            return Ok(chart);
        }
        let payload: EncodedChartJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ForecastError::InvalidData(format!("failed to parse chart json payload: {e}"))
        })?;
        if payload.schema_version != ENCODED_CHART_JSON_SCHEMA_V1 {
            return Err(ForecastError::InvalidData(format!(
                "unsupported chart schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.chart)
    }
}
