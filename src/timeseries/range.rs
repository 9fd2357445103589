//! Time-window slicing of series.

use super::schema::{Channels, Series, TimePoint};

/// Inclusive time window `[from, to]` in epoch milliseconds
///
/// A window with `from > to` contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub from: i64,
    pub to: i64,
}

impl TimeRange {
    pub fn new(from: i64, to: i64) -> Self {
        Self { from, to }
    }

    pub fn contains(&self, timestamp: i64) -> bool {
        self.from <= timestamp && timestamp <= self.to
    }

    pub fn is_empty(&self) -> bool {
        self.from > self.to
    }
}

/// Points of `series` inside `range`, order preserved
pub fn slice_series(series: &[TimePoint], range: TimeRange) -> Series {
    series
        .iter()
        .filter(|point| range.contains(point.timestamp))
        .copied()
        .collect()
}

/// Slice every channel with the same window
///
/// **Public** - channel order and point order are preserved
pub fn slice(channels: &Channels<Series>, range: TimeRange) -> Channels<Series> {
    channels.map(|series| slice_series(series, range))
}
