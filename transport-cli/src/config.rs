//! Process configuration read from the environment.
//!
//! `main` loads `.env` first, so every variable here can also live in a
//! dotenv file next to the binary.

use std::path::PathBuf;

use crate::api::{ArtifactStore, ClientConfig, DEFAULT_RESPONSES_DIR, DEFAULT_TIMEOUT_SECS};
use crate::stations::DEFAULT_STATION_LIST;

/// Transport API credential.
pub const API_KEY_VAR: &str = "API_KEY";
/// Override for the API base URL.
pub const BASE_URL_VAR: &str = "TRANSPORT_API_BASE_URL";
/// Directory for raw response artifacts.
pub const RESPONSES_DIR_VAR: &str = "TRANSPORT_RESPONSES_DIR";
/// Path to the station name list.
pub const STATION_LIST_VAR: &str = "TRANSPORT_STATION_LIST";
/// Request timeout in seconds.
pub const TIMEOUT_VAR: &str = "TRANSPORT_TIMEOUT_SECS";

/// The error worth reporting from a dotenv load, if any.
///
/// A missing `.env` file is normal; a file that exists but cannot be read or
/// parsed is not.
pub fn env_file_error<T>(result: dotenvy::Result<T>) -> Option<dotenvy::Error> {
    match result {
        Err(e) if !e.not_found() => Some(e),
        _ => None,
    }
}

/// Settings established once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Empty when `API_KEY` is unset; the API answers 401 in that case.
    pub api_key: String,
    pub base_url: Option<String>,
    pub responses_dir: PathBuf,
    pub station_list: PathBuf,
    pub timeout_secs: u64,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset. An unparseable timeout falls back
    /// to the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let timeout_secs = match get(TIMEOUT_VAR) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "invalid {TIMEOUT_VAR}, using default");
                DEFAULT_TIMEOUT_SECS
            }),
            None => DEFAULT_TIMEOUT_SECS,
        };

        Self {
            api_key: lookup(API_KEY_VAR).unwrap_or_default(),
            base_url: get(BASE_URL_VAR),
            responses_dir: get(RESPONSES_DIR_VAR)
                .map_or_else(|| PathBuf::from(DEFAULT_RESPONSES_DIR), PathBuf::from),
            station_list: get(STATION_LIST_VAR)
                .map_or_else(|| PathBuf::from(DEFAULT_STATION_LIST), PathBuf::from),
            timeout_secs,
        }
    }

    /// Client configuration derived from these settings.
    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(&self.api_key)
            .with_timeout(self.timeout_secs)
            .with_artifacts(ArtifactStore::new(&self.responses_dir));

        match &self.base_url {
            Some(url) => config.with_base_url(url),
            None => config,
        }
    }
}
