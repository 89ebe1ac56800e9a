//! API-specific error types
//!
//! Errors that can occur while talking to the Vault HTTP API.
//!
//! # Error Types
//!
//! - **`Transport`**: Connection, TLS or timeout failures from `reqwest`
//! - **`Status`**: The server answered with a non-success status code
//! - **`Decode`**: The response body was not the expected JSON shape
//! - **`InvalidUrl`**: The configured base URL could not be parsed

use thiserror::Error;

/// Vault API errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or the response could not be read
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },

    /// The response body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The base URL or an endpoint URL is malformed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// HTTP status code, when the server produced one
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for 401/403 answers from member-only endpoints
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
