use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, ForecastResult};
use crate::render::Color;

/// Reversed viridis key colors: low values are yellow, high values purple.
const VIRIDIS_REVERSED: [(f64, (u8, u8, u8)); 5] = [
    (0.0, (253, 231, 37)),
    (0.25, (94, 201, 98)),
    (0.5, (33, 145, 140)),
    (0.75, (59, 82, 139)),
    (1.0, (68, 1, 84)),
];

/// Continuous color mapping over a numeric domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorScale {
    domain_min: f64,
    domain_max: f64,
    stops: Vec<(f64, Color)>,
}

impl ColorScale {
    pub fn viridis_reversed(domain_min: f64, domain_max: f64) -> ForecastResult<Self> {
        let stops = VIRIDIS_REVERSED
            .iter()
            .map(|&(offset, (r, g, b))| (offset, Color::from_rgb8(r, g, b)))
            .collect();
        Self::new(domain_min, domain_max, stops)
    }

    /// Builds a scale from stops sorted by offset in `[0, 1]`.
    pub fn new(domain_min: f64, domain_max: f64, stops: Vec<(f64, Color)>) -> ForecastResult<Self> {
        if !domain_min.is_finite() || !domain_max.is_finite() {
            return Err(ForecastError::InvalidData(
                "color domain must be finite".to_owned(),
            ));
        }
        if stops.is_empty() {
            return Err(ForecastError::InvalidData(
                "color scale needs at least one stop".to_owned(),
            ));
        }
        if stops.windows(2).any(|pair| pair[1].0 < pair[0].0) {
            return Err(ForecastError::InvalidData(
                "color stops must be sorted by offset".to_owned(),
            ));
        }

        Ok(Self {
            domain_min: domain_min.min(domain_max),
            domain_max: domain_min.max(domain_max),
            stops,
        })
    }

    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    /// Position of `value` in the domain, clamped to `[0, 1]`.
    ///
    /// A zero-width domain maps every value to the midpoint.
    #[must_use]
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.domain_max - self.domain_min;
        if span <= 0.0 || !value.is_finite() {
            return 0.5;
        }
        ((value - self.domain_min) / span).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn color_at(&self, value: f64) -> Color {
        let t = self.normalize(value);
        let upper = self.stops.partition_point(|(offset, _)| *offset < t);
        if upper == 0 {
            return self.stops[0].1;
        }
        if upper >= self.stops.len() {
            return self.stops[self.stops.len() - 1].1;
        }

        let (lo_offset, lo_color) = self.stops[upper - 1];
        let (hi_offset, hi_color) = self.stops[upper];
        let width = hi_offset - lo_offset;
        if width <= 0.0 || hi_offset == t {
            return hi_color;
        }
        lo_color.lerp(hi_color, (t - lo_offset) / width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_hit_first_and_last_stop() {
        let scale = ColorScale::viridis_reversed(5.0, 25.0).expect("scale");
        assert_eq!(scale.color_at(5.0), Color::from_rgb8(253, 231, 37));
        assert_eq!(scale.color_at(25.0), Color::from_rgb8(68, 1, 84));
        assert_eq!(scale.color_at(-100.0), scale.color_at(5.0));
        assert_eq!(scale.color_at(15.0), Color::from_rgb8(33, 145, 140));
    }

    #[test]
    fn degenerate_domain_uses_midpoint() {
        let scale = ColorScale::viridis_reversed(3.0, 3.0).expect("scale");
        assert_eq!(scale.normalize(3.0), 0.5);
        assert_eq!(scale.normalize(99.0), 0.5);
    }

    #[test]
    fn rejects_unsorted_stops() {
        let err = ColorScale::new(
            0.0,
            1.0,
            vec![
                (1.0, Color::rgb(0.0, 0.0, 0.0)),
                (0.0, Color::rgb(1.0, 1.0, 1.0)),
            ],
        )
        .expect_err("must reject");
        assert!(format!("{err}").contains("sorted"));
    }
}
