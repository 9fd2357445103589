//! In-memory fixture store.
//!
//! Datasets are read-only once loaded and normalized; client profiles live
//! in the separate `ClientDirectory` because they can change at runtime.

use super::filter::filter_fields;
use super::schema::ClientId;
use crate::timeseries::{
    normalize_channels, query, Aggregator, ChannelData, Channels, EmptyChannelPolicy, Series,
    TimeRange,
};
use crate::utils::config::{AUDIENCE_CHANNEL, CDN_CHANNEL, P2P_CHANNEL};
use crate::utils::error::ApiError;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Per-client datasets
#[derive(Debug, Clone, Default)]
pub struct ClientDataset {
    /// Single `audience` channel
    pub audience: Channels<Series>,

    /// `cdn` and `p2p` channels
    pub bandwidth: Channels<Series>,

    /// Stream descriptions, served as-is
    pub streams: Vec<Value>,
}

impl ClientDataset {
    /// Dataset with the expected channels present but empty
    pub fn empty() -> Self {
        Self {
            audience: Channels::new().with(AUDIENCE_CHANNEL, Vec::new()),
            bandwidth: Channels::new()
                .with(CDN_CHANNEL, Vec::new())
                .with(P2P_CHANNEL, Vec::new()),
            streams: Vec::new(),
        }
    }
}

/// Global statistic lists shared by every client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    Countries,
    Isps,
    Platforms,
}

impl StatKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            StatKind::Countries => "country.json",
            StatKind::Isps => "isp.json",
            StatKind::Platforms => "platform.json",
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatKind::Countries => "countries",
            StatKind::Isps => "isps",
            StatKind::Platforms => "platforms",
        };
        f.write_str(name)
    }
}

/// Every dataset the mock serves
#[derive(Debug, Clone, Default)]
pub struct FixtureStore {
    pub datasets: HashMap<ClientId, ClientDataset>,
    pub notifications: Vec<Value>,
    pub countries: Vec<Value>,
    pub isps: Vec<Value>,
    pub platforms: Vec<Value>,
}

impl FixtureStore {
    /// Dataset of `client`
    pub fn dataset(&self, client: ClientId) -> Result<&ClientDataset, ApiError> {
        self.datasets
            .get(&client)
            .ok_or(ApiError::UnknownClient(client))
    }

    /// Shift every audience and bandwidth series so it ends at `now`
    ///
    /// **Public** - run once at startup, before the store is shared
    ///
    /// # Returns
    /// Number of non-empty series that were shifted
    pub fn normalize_timestamps(&mut self, now: i64) -> usize {
        self.datasets
            .values_mut()
            .map(|dataset| {
                normalize_channels(&mut dataset.audience, now)
                    + normalize_channels(&mut dataset.bandwidth, now)
            })
            .sum()
    }

    /// Bandwidth of `client` within `[from, to]`, optionally aggregated
    ///
    /// # Errors
    /// * `ApiError::Series` - unknown aggregator name
    /// * `ApiError::UnknownClient` - no dataset for the client
    pub fn slice_bandwidth(
        &self,
        client: ClientId,
        from: i64,
        to: i64,
        aggregate: Option<&str>,
        policy: EmptyChannelPolicy,
    ) -> Result<ChannelData, ApiError> {
        let aggregator = parse_aggregator(aggregate)?;
        let dataset = self.dataset(client)?;
        Ok(query(
            &dataset.bandwidth,
            TimeRange::new(from, to),
            aggregator,
            policy,
        ))
    }

    /// Audience of `client` within `[from, to]`, optionally aggregated
    pub fn slice_audience(
        &self,
        client: ClientId,
        from: i64,
        to: i64,
        aggregate: Option<&str>,
    ) -> Result<ChannelData, ApiError> {
        let aggregator = parse_aggregator(aggregate)?;
        let dataset = self.dataset(client)?;
        // Single channel, so the empty-channel policy never kicks in
        Ok(query(
            &dataset.audience,
            TimeRange::new(from, to),
            aggregator,
            EmptyChannelPolicy::Independent,
        ))
    }

    pub fn streams(&self, client: ClientId) -> Result<&[Value], ApiError> {
        Ok(&self.dataset(client)?.streams)
    }

    /// A statistic list, restricted to `fields` when given
    pub fn stats(&self, kind: StatKind, fields: &[String]) -> Vec<Value> {
        let items = match kind {
            StatKind::Countries => &self.countries,
            StatKind::Isps => &self.isps,
            StatKind::Platforms => &self.platforms,
        };
        filter_fields(items, fields)
    }

    /// Total number of points across all series, for startup logging
    pub fn point_count(&self) -> usize {
        self.datasets
            .values()
            .flat_map(|d| d.audience.iter().chain(d.bandwidth.iter()))
            .map(|(_, series)| series.len())
            .sum()
    }
}

fn parse_aggregator(name: Option<&str>) -> Result<Option<Aggregator>, ApiError> {
    name.map(str::parse::<Aggregator>)
        .transpose()
        .map_err(ApiError::from)
}
