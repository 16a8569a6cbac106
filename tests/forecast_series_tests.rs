use chrono::{DateTime, Duration, TimeZone, Utc};
use forecast_window::ForecastError;
use forecast_window::core::{ForecastSeries, GeoPoint};

fn hourly(count: usize) -> Vec<DateTime<Utc>> {
    let start = Utc
        .with_ymd_and_hms(2025, 3, 1, 0, 0, 0)
        .single()
        .expect("valid start");
    (0..count).map(|i| start + Duration::hours(i as i64)).collect()
}

#[test]
fn uncertainty_matches_reference_scenario() {
    let series = ForecastSeries::new(
        hourly(3),
        vec![5.0, 8.0, 3.0],
        vec![6.0, 12.0, 3.0],
        vec![None, None, None],
    )
    .expect("series");
    assert_eq!(series.uncertainty(), vec![1.0, 4.0, 0.0]);
}

#[test]
fn misaligned_fields_are_rejected() {
    let err = ForecastSeries::new(hourly(3), vec![1.0; 2], vec![1.0; 3], vec![None; 3])
        .expect_err("must reject");
    assert!(format!("{err}").contains("primary has 2 values"));
}

#[test]
fn non_increasing_timestamps_are_rejected() {
    let mut times = hourly(3);
    times.swap(1, 2);
    let err = ForecastSeries::new(times, vec![1.0; 3], vec![1.0; 3], vec![None; 3])
        .expect_err("must reject");
    assert!(matches!(err, ForecastError::InvalidData(_)));

    let duplicated = vec![hourly(1)[0]; 2];
    assert!(ForecastSeries::new(duplicated, vec![1.0; 2], vec![1.0; 2], vec![None; 2]).is_err());
}

#[test]
fn non_finite_magnitudes_are_rejected_but_categorical_degrades() {
    assert!(
        ForecastSeries::new(hourly(1), vec![f64::NAN], vec![1.0], vec![None]).is_err()
    );

    let series = ForecastSeries::new(hourly(2), vec![1.0; 2], vec![2.0; 2], vec![
        Some(f64::INFINITY),
        Some(10.0),
    ])
    .expect("series");
    assert_eq!(series.categorical(), &[None, Some(10.0)]);
}

#[test]
fn truncation_keeps_fields_aligned() {
    let series = ForecastSeries::new(hourly(5), vec![1.0; 5], vec![2.0; 5], vec![None; 5])
        .expect("series")
        .truncated(2);
    assert_eq!(series.len(), 2);
    assert_eq!(series.primary().len(), 2);
    assert_eq!(series.bound().len(), 2);
    assert_eq!(series.categorical().len(), 2);
    assert_eq!(series.first_timestamp(), Some(hourly(1)[0]));
}

#[test]
fn geo_point_validation_and_label() {
    let point = GeoPoint::new(42.35656, -71.08575).expect("point");
    assert_eq!(point.display_label(), "42.35656, -71.08575");

    assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
    assert!(GeoPoint::new(0.0, 181.0).is_err());
    assert!(matches!(
        GeoPoint::parse("abc", "1"),
        Err(ForecastError::InvalidPoint(_))
    ));
    assert_eq!(GeoPoint::parse("-10", "20").expect("parse"), GeoPoint::new(-10.0, 20.0).expect("point"));
}
