//! Reduction of sliced series into one number per channel.
//!
//! `sum` and `average` report 0 for an empty input. `max` and `min` have no
//! meaningful value without data and report `None`, which goes out as JSON
//! `null`.

use super::schema::{Channels, Series, TimePoint};
use crate::utils::error::SeriesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named reduction over the values of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregator {
    Sum,
    Max,
    Min,
    Average,
}

impl Aggregator {
    pub const ALL: [Aggregator; 4] = [
        Aggregator::Sum,
        Aggregator::Max,
        Aggregator::Min,
        Aggregator::Average,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Aggregator::Sum => "sum",
            Aggregator::Max => "max",
            Aggregator::Min => "min",
            Aggregator::Average => "average",
        }
    }

    /// Reduce the values of `points`
    pub fn apply(&self, points: &[TimePoint]) -> Option<f64> {
        let values = points.iter().map(|p| p.value);
        match self {
            Aggregator::Sum => Some(values.sum()),
            Aggregator::Max => values.reduce(f64::max),
            Aggregator::Min => values.reduce(f64::min),
            Aggregator::Average => {
                if points.is_empty() {
                    Some(0.0)
                } else {
                    Some(values.sum::<f64>() / points.len() as f64)
                }
            }
        }
    }
}

impl FromStr for Aggregator {
    type Err = SeriesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Aggregator::ALL
            .into_iter()
            .find(|agg| agg.name() == s)
            .ok_or_else(|| SeriesError::UnsupportedAggregator(s.to_string()))
    }
}

impl fmt::Display for Aggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What to report when some channels of a multi-channel request are empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyChannelPolicy {
    /// Any empty channel zeroes every channel (legacy dashboard behaviour)
    #[default]
    ZeroAll,

    /// Each channel is reduced on its own
    Independent,
}

impl FromStr for EmptyChannelPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zero_all" => Ok(EmptyChannelPolicy::ZeroAll),
            "independent" => Ok(EmptyChannelPolicy::Independent),
            other => Err(format!(
                "unknown empty-channel policy '{}' (expected zero_all or independent)",
                other
            )),
        }
    }
}

/// Reduce one sliced channel
pub fn aggregate(points: &[TimePoint], aggregator: Aggregator) -> Option<f64> {
    aggregator.apply(points)
}

/// Reduce every channel of a sliced request
///
/// **Public** - main entry point for aggregated queries
///
/// # Arguments
/// * `channels` - Already sliced channels
/// * `aggregator` - Reduction to apply
/// * `policy` - Handling of empty channels when more than one channel is requested
pub fn aggregate_channels(
    channels: &Channels<Series>,
    aggregator: Aggregator,
    policy: EmptyChannelPolicy,
) -> Channels<Option<f64>> {
    let short_circuit = policy == EmptyChannelPolicy::ZeroAll
        && channels.len() > 1
        && channels.iter().any(|(_, series)| series.is_empty());

    if short_circuit {
        return channels.map(|_| Some(0.0));
    }

    channels.map(|series| aggregator.apply(series))
}
