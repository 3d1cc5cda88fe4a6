//! Transport for NSW trip planner HTTP client.
//!
//! Every query goes through [`TransportClient::execute`], which archives the
//! raw response and classifies the HTTP status. Non-success statuses are not
//! turned into errors: the caller receives the payload together with the
//! [`Outcome`] and decides whether there is anything usable in it.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::redirect::Policy;
use serde_json::Value;
use tracing::debug;

use super::artifact::ArtifactStore;
use super::error::ApiError;
use super::outcome::{Outcome, classify};
use super::params::QueryParams;

/// Default base URL for the trip planner API.
pub const DEFAULT_BASE_URL: &str = "https://api.transport.nsw.gov.au/v1/tp";

/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the trip planner client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key, sent as `Authorization: apikey <key>`
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Where raw responses are archived
    pub artifacts: ArtifactStore,
}

impl ClientConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            artifacts: ArtifactStore::default(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the response archive directory.
    pub fn with_artifacts(mut self, artifacts: ArtifactStore) -> Self {
        self.artifacts = artifacts;
        self
    }
}

/// Trip planner API client.
///
/// The credential header is fixed at construction and sent with every request.
#[derive(Debug, Clone)]
pub struct TransportClient {
    http: reqwest::Client,
    base_url: String,
    artifacts: ArtifactStore,
}

impl TransportClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();

        let auth = HeaderValue::from_str(&format!("apikey {}", config.api_key)).map_err(|_| {
            ApiError::ClientBuild {
                message: "invalid API key format".to_string(),
            }
        })?;
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            // a 301 must reach the classifier, not be followed
            .redirect(Policy::none())
            .build()
            .map_err(|e| ApiError::ClientBuild {
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            artifacts: config.artifacts,
        })
    }

    /// Full URL for an endpoint path such as `stop_finder`.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// Perform a GET against `endpoint` and classify the response.
    ///
    /// Exactly one artifact is written for every response received, including
    /// error statuses and bodies that are not JSON. The payload is returned
    /// even when the outcome is not [`Outcome::Success`].
    ///
    /// # Errors
    ///
    /// * [`ApiError::Network`] on connection failure or timeout
    /// * [`ApiError::Parse`] if the body is not JSON (after archiving it)
    /// * [`ApiError::MissingField`] if `ErrorDetails.Message` is malformed
    pub async fn execute(
        &self,
        endpoint: &str,
        params: &QueryParams,
    ) -> Result<(Value, Outcome), ApiError> {
        let url = self.endpoint_url(endpoint);
        debug!(%url, params = params.len(), "sending request");

        let response = self.http.get(&url).query(&params.to_pairs()).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        let payload: Value = match serde_json::from_str(&body) {
            Ok(payload) => payload,
            Err(e) => {
                let path = self.artifacts.save(&Value::String(body.clone()))?;
                debug!(?path, status, "archived non-JSON response");
                return Err(ApiError::Parse {
                    message: e.to_string(),
                    body: body.chars().take(500).collect(),
                });
            }
        };

        let path = self.artifacts.save(&payload)?;
        debug!(?path, status, "archived response");

        let message = if status == 200 {
            String::new()
        } else {
            error_message(&payload)?
        };

        let outcome = classify(status, &message);
        Ok((payload, outcome))
    }
}

/// Extract `ErrorDetails.Message` from an error payload.
///
/// Absence of either key yields an empty message. A key that is present with
/// the wrong JSON type is reported as a missing field.
fn error_message(payload: &Value) -> Result<String, ApiError> {
    let details = match payload.get("ErrorDetails") {
        None | Some(Value::Null) => return Ok(String::new()),
        Some(details) => details,
    };

    if !details.is_object() {
        return Err(ApiError::missing("ErrorDetails"));
    }

    match details.get("Message") {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(message)) => Ok(message.clone()),
        Some(_) => Err(ApiError::missing("ErrorDetails.Message")),
    }
}
