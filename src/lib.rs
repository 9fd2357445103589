//! Mock Dashboard API
//!
//! A fake analytics-dashboard backend for frontend development. It serves
//! canned audience, bandwidth, stream and traffic-breakdown fixtures behind
//! a minimal session-token login.
//!
//! ## Getting Started
//!
//! ```bash
//! cargo run -- serve --data-dir data
//! curl -X POST localhost:3000/auth \
//!      -H 'content-type: application/json' \
//!      -d '{"identifiant": "urtoob", "password": "ToobRU"}'
//! ```
//!
//! Time series are shifted at startup so the most recent sample is "now".

pub mod commands;
pub mod fixtures;
pub mod server;
pub mod session;
pub mod timeseries;
pub mod utils;
