//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the library components to perform user tasks.

pub mod models;
pub mod serve;
pub mod utils;

// Re-export main command functions
pub use models::ServeArgs;
pub use serve::{execute_serve, prepare_state, resolve_config};
pub use utils::{display_routes, display_version, validate_fixtures};
