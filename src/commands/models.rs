use std::path::PathBuf;

/// Arguments for the serve command
///
/// **Public** - used by main.rs to construct from CLI args
///
/// Every `Some` value overrides the config file.
#[derive(Debug, Clone, Default)]
pub struct ServeArgs {
    /// Optional TOML config file
    pub config: Option<PathBuf>,

    /// Listen host
    pub host: Option<String>,

    /// Listen port
    pub port: Option<u16>,

    /// Fixture directory
    pub data_dir: Option<PathBuf>,

    /// Empty-channel policy name (zero_all or independent)
    pub empty_channel: Option<String>,

    /// Seed for deterministic session tokens
    pub token_seed: Option<u64>,

    /// Serve fixture timestamps as recorded
    pub no_normalize: bool,
}
