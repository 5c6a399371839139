//! Error types for the SuperVault monitor.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors that can occur when fetching from the pricing API.
///
/// `FetchError` is `Clone` so that a single coalesced fetch can report the
/// same failure to every caller that awaited it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Connection-level failure (DNS, refused connection, timeout)
    #[error("network error: {0}")]
    Network(String),

    /// API returned a non-2xx status code
    #[error("API error (status {status}): {message}")]
    Http { status: u16, message: String },

    /// Response body could not be read or parsed
    #[error("parse error: {0}")]
    Parse(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Other(String),
}

/// Convenience type alias for Results with FetchError
pub type FetchResult<T> = Result<T, FetchError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
