//! Error types for the API client.
//!
//! # Design
//! Every failed call ends in exactly one `ApiError`. Server failures carry a
//! single normalized message (see `recovery::error_message`) so callers can
//! show it to the user verbatim. The remaining variants cover failures that
//! never produced a usable response.

use thiserror::Error;

/// Errors returned by resource client calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status that could not be recovered.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// The request never produced a response (connection refused, timeout).
    #[error("transport failed: {0}")]
    Transport(String),

    /// A 2xx body did not match the expected response type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The configured base URL is not a valid absolute URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// HTTP status of a server failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// The single human-readable message for this error.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<url::ParseError> for ApiError {
    fn from(error: url::ParseError) -> Self {
        ApiError::InvalidUrl(error.to_string())
    }
}

impl From<ureq::Error> for ApiError {
    fn from(error: ureq::Error) -> Self {
        ApiError::Transport(error.to_string())
    }
}
