//! Fixture directory loader.
//!
//! Expected layout:
//!
//! ```text
//! data/
//!   clients.json            required, array of client records
//!   audience_<id>.json      {"audience": [[ts, viewers], ...]}
//!   bandwidth_<id>.json     {"cdn": [[ts, bytes], ...], "p2p": [...]}
//!   streams_<id>.json       array of stream objects
//!   notifications.json      array
//!   country.json            array
//!   isp.json                array
//!   platform.json           array
//! ```
//!
//! Everything except clients.json is optional; a missing file yields an
//! empty dataset, the same as a client without traffic.

use super::schema::{AudienceFile, BandwidthFile, ClientDirectory, ClientId, ClientRecord};
use super::store::{ClientDataset, FixtureStore, StatKind};
use crate::timeseries::Channels;
use crate::utils::config::{AUDIENCE_CHANNEL, CDN_CHANNEL, P2P_CHANNEL};
use crate::utils::error::FixtureError;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub const CLIENTS_FILE: &str = "clients.json";
pub const NOTIFICATIONS_FILE: &str = "notifications.json";

/// Everything read from a fixture directory
#[derive(Debug, Clone)]
pub struct LoadedFixtures {
    pub clients: ClientDirectory,
    pub store: FixtureStore,
}

/// Load every fixture from `dir`
///
/// **Public** - main entry point for fixture loading
///
/// # Errors
/// * `FixtureError::ReadFailed` - clients.json missing or unreadable
/// * `FixtureError::JsonError` - any file holds invalid JSON
/// * `FixtureError::InvalidData` - duplicate clients or wrong top-level shape
pub fn load_fixtures(dir: impl AsRef<Path>) -> Result<LoadedFixtures, FixtureError> {
    let dir = dir.as_ref();

    info!("Loading fixtures from: {}", dir.display());

    let records: Vec<ClientRecord> = read_json(&dir.join(CLIENTS_FILE))?;
    let clients = ClientDirectory::new(records)?;

    debug!("Loaded {} clients", clients.len());

    let mut store = FixtureStore::default();
    for id in clients.ids() {
        let dataset = load_client_dataset(dir, id)?;
        store.datasets.insert(id, dataset);
    }

    store.notifications = read_list(dir, NOTIFICATIONS_FILE)?;
    store.countries = read_list(dir, StatKind::Countries.file_name())?;
    store.isps = read_list(dir, StatKind::Isps.file_name())?;
    store.platforms = read_list(dir, StatKind::Platforms.file_name())?;

    info!(
        "Loaded fixtures: {} clients, {} points",
        clients.len(),
        store.point_count()
    );

    Ok(LoadedFixtures { clients, store })
}

/// Load the datasets of one client
fn load_client_dataset(dir: &Path, id: ClientId) -> Result<ClientDataset, FixtureError> {
    let audience: AudienceFile = read_optional(dir, &format!("audience_{}.json", id))?.unwrap_or_default();
    let bandwidth: BandwidthFile = read_optional(dir, &format!("bandwidth_{}.json", id))?.unwrap_or_default();
    let streams: Vec<Value> = read_optional(dir, &format!("streams_{}.json", id))?.unwrap_or_default();

    Ok(ClientDataset {
        audience: Channels::new().with(AUDIENCE_CHANNEL, audience.audience),
        bandwidth: Channels::new()
            .with(CDN_CHANNEL, bandwidth.cdn)
            .with(P2P_CHANNEL, bandwidth.p2p),
        streams,
    })
}

/// Optional top-level JSON array
fn read_list(dir: &Path, name: &str) -> Result<Vec<Value>, FixtureError> {
    match read_optional::<Value>(dir, name)? {
        None => {
            warn!("Fixture {} not found, serving an empty list", name);
            Ok(Vec::new())
        }
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(FixtureError::InvalidData(format!(
            "{} must contain a JSON array",
            name
        ))),
    }
}

/// Read `dir/name` if it exists
fn read_optional<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<Option<T>, FixtureError> {
    let path = dir.join(name);
    if !path.exists() {
        debug!("Optional fixture missing: {}", path.display());
        return Ok(None);
    }
    read_json(&path).map(Some)
}

/// Deserialize a JSON file
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, FixtureError> {
    debug!("Reading fixture: {}", path.display());

    let file = File::open(path).map_err(|source| FixtureError::ReadFailed {
        path: path.display().to_string(),
        source,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| FixtureError::JsonError {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_missing_clients_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = load_fixtures(temp_dir.path());
        assert!(matches!(result, Err(FixtureError::ReadFailed { .. })));
    }

    #[test]
    fn test_optional_files_default_to_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(
            temp_dir.path(),
            CLIENTS_FILE,
            r#"[{"id": 0, "identifier": "demo", "password": "pw"}]"#,
        );

        let loaded = load_fixtures(temp_dir.path()).unwrap();
        let dataset = loaded.store.dataset(0).unwrap();

        assert_eq!(loaded.clients.len(), 1);
        assert!(dataset.audience.get(AUDIENCE_CHANNEL).unwrap().is_empty());
        assert_eq!(dataset.bandwidth.len(), 2);
        assert!(loaded.store.countries.is_empty());
    }

    #[test]
    fn test_invalid_json_reports_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(
            temp_dir.path(),
            CLIENTS_FILE,
            r#"[{"id": 0, "identifier": "demo", "password": "pw"}]"#,
        );
        write(temp_dir.path(), "bandwidth_0.json", "{ not json");

        let err = load_fixtures(temp_dir.path()).unwrap_err();
        assert!(err.to_string().contains("bandwidth_0.json"));
    }

    #[test]
    fn test_stat_file_must_be_array() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), CLIENTS_FILE, "[]");
        write(temp_dir.path(), "isp.json", r#"{"name": "Orange"}"#);

        assert!(matches!(
            load_fixtures(temp_dir.path()),
            Err(FixtureError::InvalidData(_))
        ));
    }
}
