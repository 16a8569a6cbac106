pub mod primitives;
pub mod time_window;
pub mod types;
pub mod windowing;

pub use primitives::{
    SECONDS_PER_HOUR, datetime_to_unix_seconds, hours_to_seconds, parse_timestamp,
    unix_seconds_to_datetime,
};
pub use time_window::TimeWindow;
pub use types::{ForecastSeries, GeoPoint};
pub use windowing::samples_in_time_window;
