//! Transit API error types.

/// Errors from talking to the transit API.
#[derive(Debug, thiserror::Error)]
pub enum TransitError {
    /// Credential exchange failed
    #[error("authentication failed{}: {message}", .status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Auth {
        status: Option<u16>,
        message: String,
    },

    /// Transport-level failure (connect, timeout, TLS, ...)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// API returned a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not the expected JSON shape
    #[error("decode error: {message}")]
    Decode {
        message: String,
        body: Option<String>,
    },

    /// Stop search returned no candidates
    #[error("no stop matches {query:?}")]
    NotFound { query: String },
}

impl TransitError {
    /// Build a decode error from a serde failure, keeping an excerpt of the body.
    pub(crate) fn decode(err: impl std::fmt::Display, body: &str) -> Self {
        TransitError::Decode {
            message: err.to_string(),
            body: Some(body.chars().take(500).collect()),
        }
    }
}
