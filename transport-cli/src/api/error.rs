//! Trip planner client error types.

use std::path::PathBuf;

/// Errors from the trip planner HTTP client.
///
/// Non-success HTTP statuses are not errors: they are classified into an
/// [`Outcome`](super::Outcome) and returned alongside the payload.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP client could not be built (bad header value, TLS setup).
    #[error("failed to build HTTP client: {message}")]
    ClientBuild { message: String },

    /// Connection failure or timeout
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body was not valid JSON
    #[error("JSON parse error: {message} (body: {body})")]
    Parse { message: String, body: String },

    /// Payload lacks an expected key, or the key has the wrong shape
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// Response artifact could not be written
    #[error("failed to write response artifact {path:?}: {source}")]
    Artifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    pub(crate) fn missing(field: impl Into<String>) -> Self {
        ApiError::MissingField(field.into())
    }
}
