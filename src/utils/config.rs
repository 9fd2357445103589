//! Configuration and constants for the server.

use crate::timeseries::EmptyChannelPolicy;
use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Default listen port
pub const DEFAULT_PORT: u16 = 3000;

/// Default listen address
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default fixture directory, relative to the working directory
pub const DEFAULT_DATA_DIR: &str = "data";

/// Random bytes per session token (hex-encoded on the wire)
pub const TOKEN_BYTES: usize = 32;

/// Upper bound on token regeneration attempts after a collision
pub const MAX_TOKEN_ATTEMPTS: usize = 16;

// Channel names used by the fixtures and the API
pub const CDN_CHANNEL: &str = "cdn";
pub const P2P_CHANNEL: &str = "p2p";
pub const AUDIENCE_CHANNEL: &str = "audience";

/// Complete server configuration
///
/// Every section is optional in the TOML file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default)]
    pub server: ServerSection,

    /// Fixture loading
    #[serde(default)]
    pub fixtures: FixtureSection,

    /// Aggregation behaviour
    #[serde(default)]
    pub aggregate: AggregateSection,

    /// Session token generation
    #[serde(default)]
    pub session: SessionSection,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FixtureSection {
    /// Directory holding clients.json and the dataset files
    pub data_dir: PathBuf,

    /// Shift time series so their last point lands on startup time
    pub normalize_timestamps: bool,
}

impl Default for FixtureSection {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            normalize_timestamps: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AggregateSection {
    pub empty_channel: EmptyChannelPolicy,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionSection {
    /// Seed for deterministic tokens (demo and test setups only)
    pub token_seed: Option<u64>,
}

impl ServerConfig {
    /// Socket address built from the server section
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.server.host, self.server.port);
        raw.parse()
            .map_err(|_| ConfigError::Invalid(format!("invalid listen address: {}", raw)))
    }

    /// Check values that serde alone cannot validate
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Invalid("server.host cannot be empty".to_string()));
        }

        if self.fixtures.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "fixtures.data_dir cannot be empty".to_string(),
            ));
        }

        self.listen_addr()?;

        Ok(())
    }
}

/// Load configuration from a TOML file
///
/// # Errors
/// * `ConfigError::IoError` - If file cannot be read
/// * `ConfigError::ParseFailed` - If TOML is invalid
/// * `ConfigError::Invalid` - If values fail validation
pub fn load_config(path: impl AsRef<Path>) -> Result<ServerConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: ServerConfig = toml::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.fixtures.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        assert!(config.fixtures.normalize_timestamps);
        assert_eq!(config.aggregate.empty_channel, EmptyChannelPolicy::ZeroAll);
        assert!(config.session.token_seed.is_none());
    }

    #[test]
    fn test_load_partial_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[server]\nport = 8080\n\n[aggregate]\nempty_channel = \"independent\""
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.aggregate.empty_channel, EmptyChannelPolicy::Independent);
    }

    #[test]
    fn test_load_rejects_bad_host() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nhost = \"not a host\"").unwrap();

        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_load_rejects_unknown_policy() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[aggregate]\nempty_channel = \"sometimes\"").unwrap();

        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::ParseFailed(_))
        ));
    }
}
