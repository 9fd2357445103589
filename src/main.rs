//! Mock Dashboard API CLI
//!
//! Serves canned dashboard fixtures over HTTP for frontend development.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use mock_dashboard_api::commands::{
    display_routes, display_version, execute_serve, resolve_config, validate_fixtures, ServeArgs,
};
use mock_dashboard_api::utils::config::DEFAULT_DATA_DIR;

/// Mock Dashboard API - canned analytics data behind a fake login
#[derive(Parser, Debug)]
#[command(name = "mock-dashboard-api")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the mock API
    Serve {
        /// TOML configuration file
        #[arg(short, long, env = "MOCK_API_CONFIG")]
        config: Option<PathBuf>,

        /// Listen host (IP address)
        #[arg(long, env = "MOCK_API_HOST")]
        host: Option<String>,

        /// Listen port
        #[arg(short, long, env = "MOCK_API_PORT")]
        port: Option<u16>,

        /// Fixture directory
        #[arg(short, long, env = "MOCK_API_DATA_DIR")]
        data_dir: Option<PathBuf>,

        /// Empty-channel policy for aggregated bandwidth: zero_all or independent
        #[arg(long)]
        empty_channel: Option<String>,

        /// Seed session tokens for reproducible demos
        #[arg(long)]
        token_seed: Option<u64>,

        /// Keep fixture timestamps as recorded
        #[arg(long)]
        no_normalize: bool,
    },

    /// Validate a fixture directory
    Validate {
        /// Fixture directory
        #[arg(short, long, default_value = DEFAULT_DATA_DIR)]
        data_dir: PathBuf,
    },

    /// Display the route table
    Routes,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Serve {
            config,
            host,
            port,
            data_dir,
            empty_channel,
            token_seed,
            no_normalize,
        } => {
            let args = ServeArgs {
                config,
                host,
                port,
                data_dir,
                empty_channel,
                token_seed,
                no_normalize,
            };

            // Validate args first
            resolve_config(&args)?;

            execute_serve(args)?;
        }

        Commands::Validate { data_dir } => {
            validate_fixtures(&data_dir)?;
        }

        Commands::Routes => {
            display_routes();
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
