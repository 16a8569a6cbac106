use std::ops::Range;

/// Returns the index range of sorted sample times inside an inclusive window.
#[must_use]
pub fn samples_in_time_window(times: &[f64], start: f64, end: f64) -> Range<usize> {
    let (min_t, max_t) = if start <= end {
        (start, end)
    } else {
        (end, start)
    };

    let first = times.partition_point(|&time| time < min_t);
    let last = times.partition_point(|&time| time <= max_t);
    first..last.max(first)
}
