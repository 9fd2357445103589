//! Time-series handling for audience and bandwidth fixtures.
//!
//! This module provides:
//! - Timestamp normalization (demo data always ends "now")
//! - Inclusive range slicing
//! - Per-channel aggregation (sum, max, min, average)

pub mod aggregator;
pub mod normalizer;
pub mod range;
pub mod schema;

// Re-export main types and functions
pub use aggregator::{aggregate, aggregate_channels, Aggregator, EmptyChannelPolicy};
pub use normalizer::{normalize, normalize_channels, normalized, time_offset};
pub use range::{slice, slice_series, TimeRange};
pub use schema::{Channels, Series, TimePoint};

use serde::Serialize;

/// Result of a range query: raw points, or one number per channel
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChannelData {
    Points(Channels<Series>),
    Totals(Channels<Option<f64>>),
}

/// Slice `channels` to `range` and reduce them when an aggregator is given
pub fn query(
    channels: &Channels<Series>,
    range: TimeRange,
    aggregator: Option<Aggregator>,
    policy: EmptyChannelPolicy,
) -> ChannelData {
    let sliced = slice(channels, range);

    match aggregator {
        Some(agg) => ChannelData::Totals(aggregate_channels(&sliced, agg, policy)),
        None => ChannelData::Points(sliced),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_outside_data_zeroes_both_channels() {
        let channels = Channels::new()
            .with("cdn", vec![TimePoint::new(100, 5.0), TimePoint::new(200, 7.0)])
            .with("p2p", Vec::new());

        let result = query(
            &channels,
            TimeRange::new(0, 1_000),
            Some(Aggregator::Sum),
            EmptyChannelPolicy::ZeroAll,
        );

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({"cdn": 0.0, "p2p": 0.0}));
    }

    #[test]
    fn test_query_without_aggregator_returns_points() {
        let channels = Channels::new().with(
            "audience",
            vec![TimePoint::new(1, 1.0), TimePoint::new(2, 2.0)],
        );

        let result = query(&channels, TimeRange::new(2, 2), None, EmptyChannelPolicy::ZeroAll);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({"audience": [[2, 2.0]]}));
    }
}
