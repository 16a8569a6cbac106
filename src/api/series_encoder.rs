use tracing::trace;

use crate::core::{ForecastSeries, hours_to_seconds};
use crate::error::{ForecastError, ForecastResult};
use crate::render::{
    BarTrace, ChartLayout, ColorBarLayout, ColorScale, DragMode, EncodedChart, ErrorWhiskers,
    TextTrace, TimeAxisLayout, ValueAxis, ValueAxisLayout,
};

use super::{EncoderStyle, SessionConfig};

/// Vertical position of the text row inside the annotation band.
const ANNOTATION_ROW_Y: f64 = 0.5;
const ANNOTATION_RANGE: (f64, f64) = (0.0, 1.0);

/// Pure transformation from a forecast series into chart primitives.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesEncoder {
    style: EncoderStyle,
    default_window_secs: f64,
}

impl SeriesEncoder {
    pub fn new(style: EncoderStyle, default_window_hours: f64) -> ForecastResult<Self> {
        style.validate()?;
        if !default_window_hours.is_finite() || default_window_hours <= 0.0 {
            return Err(ForecastError::InvalidData(
                "default window hours must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self {
            style,
            default_window_secs: hours_to_seconds(default_window_hours),
        })
    }

    pub fn from_config(config: &SessionConfig) -> ForecastResult<Self> {
        Self::new(config.encoder.clone(), config.default_window_hours)
    }

    #[must_use]
    pub fn style(&self) -> &EncoderStyle {
        &self.style
    }

    /// Encodes bars, the categorical text row and the default layout.
    ///
    /// The initial time range covers the default window from the first
    /// sample, independent of how long the series is.
    pub fn encode(&self, series: &ForecastSeries) -> ForecastResult<EncodedChart> {
        if series.is_empty() {
            return Err(ForecastError::EmptySeries);
        }

        let x = series.times_unix();
        let primary = series.primary();
        let bound = series.bound();
        let min_primary = primary.iter().copied().fold(f64::INFINITY, f64::min);
        let max_primary = primary.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let max_bound = bound.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let colors = ColorScale::viridis_reversed(min_primary, max_bound)?;
        let fill = primary.iter().map(|&value| colors.color_at(value)).collect();
        let whisker_colors = bound.iter().map(|&value| colors.color_at(value)).collect();

        let primary_trace = BarTrace {
            name: self.style.primary_name.clone(),
            axis: ValueAxis::Primary,
            x: x.clone(),
            y: primary.to_vec(),
            bar_width_secs: self.style.bar_width_secs,
            fill,
            color_domain: colors.domain(),
            whiskers: ErrorWhiskers {
                plus: series.uncertainty(),
                minus: vec![0.0; series.len()],
                colors: whisker_colors,
            },
            custom_data: bound.to_vec(),
            hover_labels: hover_labels(series),
        };

        let annotation_trace = TextTrace {
            name: self.style.annotation_name.clone(),
            axis: ValueAxis::Annotation,
            x: x.clone(),
            y: vec![ANNOTATION_ROW_Y; series.len()],
            text: series
                .categorical()
                .iter()
                .copied()
                .map(format_categorical)
                .collect(),
        };

        let start = x[0];
        let mut value_top = max_bound.max(max_primary).max(0.0) + self.style.value_headroom;
        if value_top <= 0.0 {
            value_top = 1.0;
        }

        let layout = ChartLayout {
            time_axis: TimeAxisLayout {
                range: (start, start + self.default_window_secs),
                fixed_range: false,
            },
            value_axis: ValueAxisLayout {
                title: self.style.value_axis_title.clone(),
                domain: (self.style.annotation_band + self.style.band_gap, 1.0),
                range: (0.0, value_top),
                fixed_range: true,
                show_tick_labels: true,
            },
            annotation_axis: ValueAxisLayout {
                title: self.style.annotation_axis_title.clone(),
                domain: (0.0, self.style.annotation_band),
                range: ANNOTATION_RANGE,
                fixed_range: true,
                show_tick_labels: false,
            },
            color_bar: ColorBarLayout {
                title: self.style.colorbar_title.clone(),
                domain: colors.domain(),
            },
            drag_mode: DragMode::Pan,
        };

        let chart = EncodedChart {
            primary: primary_trace,
            annotation: annotation_trace,
            layout,
        };
        chart.validate()?;
        trace!(samples = series.len(), "encoded forecast series");
        Ok(chart)
    }
}

/// Categorical label: nearest integer with a degree suffix, empty when missing.
#[must_use]
pub fn format_categorical(value: Option<f64>) -> String {
    match value {
        Some(value) if value.is_finite() => format!("{}°", value.round() as i64),
        _ => String::new(),
    }
}

fn hover_labels(series: &ForecastSeries) -> Vec<String> {
    let unit = series.unit().map(|unit| format!(" {unit}")).unwrap_or_default();
    series
        .timestamps()
        .iter()
        .zip(series.primary())
        .zip(series.bound())
        .map(|((time, primary), bound)| {
            format!("{} · {primary:.1}{unit} (gust {bound:.1})", time.format("%a %H:%M"))
        })
        .collect()
}
