//! Error types for the reverse lookup crate.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! A provider that finds nothing is not an error: that outcome is `Ok(None)`.

use thiserror::Error;

/// Errors that can occur while fetching or resolving a lookup.
#[derive(Error, Debug)]
pub enum LookupError {
    /// Connection could not be established or was dropped
    #[error("Network error: {0}")]
    Network(String),

    /// Remote endpoint answered with a non-success status code
    #[error("HTTP error (status {status}): {message}")]
    HttpStatus { status: u16, message: String },

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Response body could not be read as text
    #[error("Failed to read response body: {0}")]
    Body(String),

    /// Local content store failed
    #[error("Content store error: {0}")]
    Store(String),

    /// Provider configuration is unusable
    #[error("Invalid provider configuration: {0}")]
    InvalidConfig(String),

    /// An extraction pattern failed to compile
    #[error("Invalid pattern for {field}: {reason}")]
    InvalidPattern { field: String, reason: String },
}

impl LookupError {
    /// True for failures that happened on the wire rather than in configuration.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            LookupError::Network(_)
                | LookupError::HttpStatus { .. }
                | LookupError::Timeout
                | LookupError::Body(_)
        )
    }
}

impl From<rusqlite::Error> for LookupError {
    fn from(err: rusqlite::Error) -> Self {
        LookupError::Store(err.to_string())
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Other(String),
}

/// Convenience type alias for Results with LookupError
pub type LookupResult<T> = Result<T, LookupError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
