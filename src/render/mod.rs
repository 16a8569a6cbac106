mod color_scale;
mod frame;
mod json_contract;
mod layout;
mod null_renderer;
mod primitives;

pub use color_scale::ColorScale;
pub use frame::EncodedChart;
pub use json_contract::{ENCODED_CHART_JSON_SCHEMA_V1, EncodedChartJsonContractV1};
pub use layout::{
    ChartLayout, ColorBarLayout, DragMode, LayoutUpdate, TimeAxisLayout, ValueAxisLayout,
};
pub use null_renderer::NullSurface;
pub use primitives::{BarTrace, Color, ErrorWhiskers, TextTrace, ValueAxis};

use crate::error::ForecastResult;

/// Contract implemented by any plotting surface.
///
/// Surfaces receive fully encoded charts and corrective layout commands, so
/// drawing code stays isolated from series encoding and viewport logic.
pub trait ChartSurface {
    fn render(&mut self, chart: &EncodedChart) -> ForecastResult<()>;

    fn relayout(&mut self, update: &LayoutUpdate) -> ForecastResult<()>;

    /// Replaces any chart with a "no data" message.
    fn show_placeholder(&mut self, message: &str) -> ForecastResult<()>;
}
