use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, ForecastResult};
use crate::render::{BarTrace, ChartLayout, TextTrace};

/// Backend-agnostic chart for one forecast series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedChart {
    pub primary: BarTrace,
    pub annotation: TextTrace,
    pub layout: ChartLayout,
}

impl EncodedChart {
    pub fn validate(&self) -> ForecastResult<()> {
        self.primary.validate()?;
        self.annotation.validate()?;
        self.layout.validate()?;

        if self.primary.x != self.annotation.x {
            return Err(ForecastError::InvalidData(
                "annotation row must share the bar time positions".to_owned(),
            ));
        }
        Ok(())
    }
}
