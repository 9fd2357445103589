//! Request and response bodies of the HTTP API.

use serde::{Deserialize, Serialize};

/// Body of `POST /auth`
#[derive(Debug, Clone, Deserialize)]
pub struct AuthRequest {
    #[serde(alias = "identifiant")]
    pub identifier: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub session_token: String,
}

/// Body of routes that only need a session
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRequest {
    pub session_token: String,
}

/// Body of `/bandwidth` and `/audience`
#[derive(Debug, Clone, Deserialize)]
pub struct RangeRequest {
    pub session_token: String,

    /// Window start, epoch ms, inclusive
    pub from: i64,

    /// Window end, epoch ms, inclusive
    pub to: i64,

    /// sum, max, min or average
    #[serde(default)]
    pub aggregate: Option<String>,
}

/// Body of `/countries`, `/isps` and `/platforms`
#[derive(Debug, Clone, Deserialize)]
pub struct StatsRequest {
    pub session_token: String,

    /// Keys to keep in every entry (all keys when empty)
    #[serde(default)]
    pub fields: Vec<String>,
}

/// Body of every failure response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}
