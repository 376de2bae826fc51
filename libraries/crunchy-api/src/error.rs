//! Error types for the Crunchyroll API client.

use thiserror::Error;

/// Errors that can occur when talking to the Crunchyroll API.
///
/// API-level failures (an envelope with `error: true`) are normally handed
/// back to the caller as an [`ApiResponse`](crate::ApiResponse) rather than
/// through this type. Only transport problems, session start failures and
/// unsupported operations are raised.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned a non-success HTTP status
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// The `start_session` call did not yield a session id
    #[error("Session start failed: {0}")]
    Session(String),

    /// Typed form of an error envelope
    #[error("API error in {method} ({code}): {message}")]
    Api {
        method: String,
        code: String,
        message: String,
    },

    /// Login failed while building a client
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Operation exists in the remote API but has no client support yet
    #[error("Operation not implemented: {0}")]
    NotImplemented(&'static str),

    /// Invalid base URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// A wire string did not match any known variant
    #[error("Unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },
}

impl From<config::ConfigError> for ClientError {
    fn from(err: config::ConfigError) -> Self {
        ClientError::Config(err.to_string())
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
