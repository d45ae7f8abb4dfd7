use thiserror::Error;

/// Top-level error type for the `syndash-api` crate.
///
/// Keeps transport failures, non-2xx API responses, and body decode
/// failures distinct so callers can apply different policies to each.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The API key could not be used as a request header.
    #[error("Invalid API key: {0}")]
    InvalidApiKey(String),

    /// Non-2xx response from the REST API.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// The HTTP status of an API-level error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
