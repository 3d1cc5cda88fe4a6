//! Station list error types.

use std::path::PathBuf;

/// Errors that can occur when loading the station list.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// The file could not be read
    #[error("failed to read station list {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a JSON array of strings
    #[error("invalid station list {path:?}: {message}")]
    Json { path: PathBuf, message: String },
}
