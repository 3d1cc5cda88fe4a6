//! Station name index.

use std::path::Path;

use super::error::StationError;

/// Default station list file, relative to the working directory.
pub const DEFAULT_STATION_LIST: &str = "stationList.json";

/// Read-only, ordered list of known station names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationIndex {
    names: Vec<String>,
}

impl StationIndex {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Load station names from a JSON array of strings.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StationError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| StationError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let names: Vec<String> =
            serde_json::from_str(&contents).map_err(|e| StationError::Json {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(Self { names })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names starting with `prefix`, ignoring case, in file order.
    ///
    /// An empty prefix matches every name.
    pub fn suggest(&self, prefix: &str) -> Vec<&str> {
        let prefix = prefix.to_lowercase();
        self.names
            .iter()
            .filter(|name| name.to_lowercase().starts_with(&prefix))
            .map(String::as_str)
            .collect()
    }
}
