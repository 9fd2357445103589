//! Serve command implementation.
//!
//! The serve command:
//! 1. Resolves the configuration (file + CLI overrides)
//! 2. Loads the fixtures
//! 3. Normalizes time-series timestamps
//! 4. Builds the shared state
//! 5. Runs the HTTP server until Ctrl-C

use super::models::ServeArgs;
use crate::fixtures::load_fixtures;
use crate::server::{run_server, AppState};
use crate::session::{RandomTokenSource, SeededTokenSource, TokenSource};
use crate::timeseries::EmptyChannelPolicy;
use crate::utils::config::{load_config, ServerConfig};
use anyhow::{Context, Result};
use chrono::Utc;
use log::{info, warn};
use std::time::Instant;

/// Execute the serve command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Invalid configuration
/// * Fixture loading errors
/// * Socket bind failures
pub fn execute_serve(args: ServeArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Step 1/4: Resolving configuration...");
    let config = resolve_config(&args)?;
    let addr = config.listen_addr()?;

    info!("Step 2/4: Loading and normalizing fixtures...");
    let state = prepare_state(&config, Utc::now().timestamp_millis())?;

    info!("Step 3/4: Empty-channel policy: {:?}", state.empty_channel);
    if config.session.token_seed.is_some() {
        warn!("Session tokens are seeded and predictable; use for demos only");
    }

    info!(
        "Step 4/4: Starting server (ready in {:.2}s)",
        start_time.elapsed().as_secs_f64()
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime
        .block_on(run_server(addr, state.shared()))
        .with_context(|| format!("Server on {} failed", addr))?;

    Ok(())
}

/// Merge the optional config file with CLI overrides
///
/// **Public** - can be called before execute_serve for early validation
pub fn resolve_config(args: &ServeArgs) -> Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ServerConfig::default(),
    };

    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }

    if let Some(port) = args.port {
        config.server.port = port;
    }

    if let Some(dir) = &args.data_dir {
        config.fixtures.data_dir = dir.clone();
    }

    if let Some(policy) = &args.empty_channel {
        config.aggregate.empty_channel = policy
            .parse::<EmptyChannelPolicy>()
            .map_err(anyhow::Error::msg)?;
    }

    if args.token_seed.is_some() {
        config.session.token_seed = args.token_seed;
    }

    if args.no_normalize {
        config.fixtures.normalize_timestamps = false;
    }

    config.validate().context("Invalid configuration")?;

    Ok(config)
}

/// Load fixtures and build the server state
///
/// **Public** - shared by the serve command and the integration tests
///
/// # Arguments
/// * `config` - Resolved configuration
/// * `now` - Epoch ms the time series are aligned to
pub fn prepare_state(config: &ServerConfig, now: i64) -> Result<AppState> {
    let data_dir = &config.fixtures.data_dir;

    let mut loaded = load_fixtures(data_dir)
        .with_context(|| format!("Failed to load fixtures from {}", data_dir.display()))?;

    if config.fixtures.normalize_timestamps {
        let shifted = loaded.store.normalize_timestamps(now);
        info!("Normalized {} series to end at {}", shifted, now);
    }

    let tokens: Box<dyn TokenSource> = match config.session.token_seed {
        Some(seed) => Box::new(SeededTokenSource::new(seed)),
        None => Box::new(RandomTokenSource),
    };

    Ok(AppState::new(loaded, tokens, config.aggregate.empty_channel))
}
