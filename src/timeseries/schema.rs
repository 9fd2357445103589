//! Time-series data model shared by the fixtures and the API.
//!
//! Points travel as two-element JSON arrays: `[timestamp_ms, value]`.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// One sample of a metric channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(i64, f64)", into = "(i64, f64)")]
pub struct TimePoint {
    /// Epoch milliseconds
    pub timestamp: i64,

    /// Sampled value
    pub value: f64,
}

impl TimePoint {
    pub fn new(timestamp: i64, value: f64) -> Self {
        Self { timestamp, value }
    }
}

impl From<(i64, f64)> for TimePoint {
    fn from((timestamp, value): (i64, f64)) -> Self {
        Self { timestamp, value }
    }
}

impl From<TimePoint> for (i64, f64) {
    fn from(point: TimePoint) -> Self {
        (point.timestamp, point.value)
    }
}

/// Ordered samples of one channel, non-decreasing by timestamp
pub type Series = Vec<TimePoint>;

/// Named channels in declaration order
///
/// Serializes as a JSON object whose keys keep the insertion order,
/// e.g. `{"cdn": ..., "p2p": ...}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Channels<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for Channels<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> Channels<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: T) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert a channel, replacing an existing one with the same name in place
    pub fn insert(&mut self, name: impl Into<String>, value: T) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut T)> {
        self.entries.iter_mut().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply `f` to every channel, keeping names and order
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Channels<U> {
        Channels {
            entries: self
                .entries
                .iter()
                .map(|(n, v)| (n.clone(), f(v)))
                .collect(),
        }
    }
}

impl<T: Serialize> Serialize for Channels<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_wire_format() {
        let point: TimePoint = serde_json::from_str("[1500000000000, 42]").unwrap();
        assert_eq!(point, TimePoint::new(1_500_000_000_000, 42.0));

        let json = serde_json::to_string(&point).unwrap();
        assert_eq!(json, "[1500000000000,42.0]");
    }

    #[test]
    fn test_channels_preserve_order() {
        let channels = Channels::new()
            .with("p2p", 1)
            .with("cdn", 2)
            .with("p2p", 3);

        let names: Vec<&str> = channels.names().collect();
        assert_eq!(names, vec!["p2p", "cdn"]);
        assert_eq!(channels.get("p2p"), Some(&3));

        let json = serde_json::to_string(&channels).unwrap();
        assert_eq!(json, r#"{"p2p":3,"cdn":2}"#);
    }
}
