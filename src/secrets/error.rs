//! Error types for secret store calls.

use thiserror::Error;

/// Result type for secret store calls.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors returned by a [`KvStore`](super::KvStore) implementation.
///
/// Token values and secret payloads never appear in these messages.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The request never produced an HTTP response.
    #[error("network error communicating with Vault: {0}")]
    Network(#[source] reqwest::Error),

    /// Vault answered with a non-success status.
    #[error("Vault returned status {status}: {}", format_api_errors(.errors))]
    Api { status: u16, errors: Vec<String> },

    /// The response body was not a Vault response envelope.
    #[error("malformed Vault response: {message}")]
    MalformedResponse { message: String },

    /// The store refused a path before issuing any request.
    #[error("invalid store path `{path}`: {reason}")]
    InvalidPath { path: String, reason: String },
}

impl StoreError {
    /// Create an API error from a status and Vault's `errors` array.
    pub fn api(status: u16, errors: Vec<String>) -> Self {
        Self::Api { status, errors }
    }

    /// Create a malformed response error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse { message: message.into() }
    }

    /// Create an invalid path error.
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath { path: path.into(), reason: reason.into() }
    }

    /// HTTP status of an API error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

fn format_api_errors(errors: &[String]) -> String {
    if errors.is_empty() {
        "no error details".to_string()
    } else {
        errors.join("; ")
    }
}
