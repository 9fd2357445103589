//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors raised by the session registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Invalid identifier or password")]
    InvalidCredentials,

    #[error("User already has an active session")]
    AlreadyLoggedIn,

    #[error("Unknown session token")]
    UnknownSession,
}

/// Errors raised by the range-slice and aggregate engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeriesError {
    #[error("Unsupported aggregator: {0}")]
    UnsupportedAggregator(String),
}

/// Errors that can occur while loading fixture files
#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    JsonError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid fixture data: {0}")]
    InvalidData(String),
}

/// Errors that can occur while loading the server configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config TOML parse error: {0}")]
    ParseFailed(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors surfaced at the HTTP boundary
///
/// Every variant collapses to the same failure status on the wire,
/// but the kind is kept so callers and logs can tell them apart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Series(#[from] SeriesError),

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("No fixtures for client {0}")]
    UnknownClient(u32),
}

impl ApiError {
    /// Stable machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Session(SessionError::InvalidCredentials) => "InvalidCredentials",
            ApiError::Session(SessionError::AlreadyLoggedIn) => "AlreadyLoggedIn",
            ApiError::Session(SessionError::UnknownSession) => "UnknownSession",
            ApiError::Series(SeriesError::UnsupportedAggregator(_)) => "UnsupportedAggregator",
            ApiError::MalformedRequest(_) => "MalformedRequest",
            ApiError::UnknownClient(_) => "UnknownClient",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_kind_is_preserved() {
        let err: ApiError = SessionError::AlreadyLoggedIn.into();
        assert_eq!(err.kind(), "AlreadyLoggedIn");

        let err: ApiError = SeriesError::UnsupportedAggregator("median".to_string()).into();
        assert_eq!(err.kind(), "UnsupportedAggregator");
        assert_eq!(err.to_string(), "Unsupported aggregator: median");
    }
}
