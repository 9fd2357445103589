//! Timestamp normalization for demo fixtures.
//!
//! Fixture files are recorded once and would look stale forever. At startup
//! every series is shifted so its last point lands on "now"; the spacing
//! between points and all values stay the same.

use super::schema::{Channels, Series, TimePoint};

/// Offset that moves the last point of `series` onto `now`
///
/// Returns 0 for an empty series.
pub fn time_offset(series: &[TimePoint], now: i64) -> i64 {
    series
        .last()
        .map(|last| now.saturating_sub(last.timestamp))
        .unwrap_or(0)
}

/// Shift `series` in place so it ends at `now`
///
/// **Public** - applied once per series at load time
///
/// # Returns
/// The offset that was added to every timestamp
pub fn normalize(series: &mut [TimePoint], now: i64) -> i64 {
    let offset = time_offset(series, now);

    if offset != 0 {
        for point in series.iter_mut() {
            point.timestamp = point.timestamp.saturating_add(offset);
        }
    }

    offset
}

/// Shifted copy of `series`, leaving the input untouched
pub fn normalized(series: &[TimePoint], now: i64) -> Series {
    let mut copy = series.to_vec();
    normalize(&mut copy, now);
    copy
}

/// Normalize every channel independently
///
/// # Returns
/// Number of non-empty series that were visited
pub fn normalize_channels(channels: &mut Channels<Series>, now: i64) -> usize {
    let mut visited = 0;
    for (_, series) in channels.iter_mut() {
        if !series.is_empty() {
            normalize(series, now);
            visited += 1;
        }
    }
    visited
}
