use crate::error::ForecastResult;
use crate::render::{ChartSurface, EncodedChart, LayoutUpdate};

/// Headless surface used by tests and embedding without a display.
///
/// It validates every chart it is handed and keeps the resulting layout in
/// sync with relayout commands, so callers can inspect what a real surface
/// would show.
#[derive(Debug, Default)]
pub struct NullSurface {
    pub last_chart: Option<EncodedChart>,
    pub layout_updates: Vec<LayoutUpdate>,
    pub placeholder: Option<String>,
    pub render_count: usize,
}

impl NullSurface {
    /// Time-axis range currently shown, if a chart is rendered.
    #[must_use]
    pub fn visible_time_range(&self) -> Option<(f64, f64)> {
        self.last_chart
            .as_ref()
            .map(|chart| chart.layout.time_axis.range)
    }
}

impl ChartSurface for NullSurface {
    fn render(&mut self, chart: &EncodedChart) -> ForecastResult<()> {
        chart.validate()?;
        self.last_chart = Some(chart.clone());
        self.placeholder = None;
        self.render_count += 1;
        Ok(())
    }

    fn relayout(&mut self, update: &LayoutUpdate) -> ForecastResult<()> {
        if let Some(chart) = self.last_chart.as_mut() {
            chart.layout.apply(update);
        }
        self.layout_updates.push(*update);
        Ok(())
    }

    fn show_placeholder(&mut self, message: &str) -> ForecastResult<()> {
        self.last_chart = None;
        self.placeholder = Some(message.to_owned());
        Ok(())
    }
}
