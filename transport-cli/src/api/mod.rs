//! Transport for NSW trip planner API client.
//!
//! This module provides the query executor used by every REPL command:
//!
//! - requests carry an `Authorization: apikey <key>` header fixed at
//!   construction time
//! - every response body is archived to disk before anything else happens
//! - HTTP statuses are classified into an [`Outcome`] and logged, never
//!   retried and never turned into errors

mod artifact;
mod client;
mod error;
mod outcome;
mod params;

pub use artifact::{ArtifactStore, DEFAULT_RESPONSES_DIR};
pub use client::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, TransportClient};
pub use error::ApiError;
pub use outcome::{Outcome, Severity, classify};
pub use params::{ParamValue, QueryParams};
