//! HTTP status classification.
//!
//! The trip planner signals quota exhaustion and moved endpoints through
//! status codes rather than error bodies, so every response is classified
//! and logged before the payload is handed back to the caller. Classification
//! never fails and never retries.

use std::fmt;

use tracing::{debug, error, warn};

/// Log level associated with an [`Outcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Debug,
    Warning,
    Error,
    Critical,
}

/// Classified result of a single API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 200
    Success,
    /// 203: the API key has run out of quota or hit the rate limit.
    QuotaLimitReached { message: String },
    /// 301: the API base path has changed and the client must be updated.
    EndpointMoved { message: String },
    /// 400
    BadRequest { message: String },
    /// 401: usually a missing or invalid `API_KEY`.
    Unauthorized { message: String },
    /// Any other status. The error message is not kept.
    UnknownStatus { status: u16 },
}

impl Outcome {
    /// Short name of the outcome, stable across releases.
    pub fn tag(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::QuotaLimitReached { .. } => "quota_limit_reached",
            Outcome::EndpointMoved { .. } => "endpoint_moved",
            Outcome::BadRequest { .. } => "bad_request",
            Outcome::Unauthorized { .. } => "unauthorized",
            Outcome::UnknownStatus { .. } => "unknown_status",
        }
    }

    /// The message extracted from the error payload, if the outcome carries one.
    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::QuotaLimitReached { message }
            | Outcome::EndpointMoved { message }
            | Outcome::BadRequest { message }
            | Outcome::Unauthorized { message } => Some(message),
            Outcome::Success | Outcome::UnknownStatus { .. } => None,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Outcome::Success => Severity::Debug,
            Outcome::QuotaLimitReached { .. } => Severity::Warning,
            Outcome::EndpointMoved { .. } => Severity::Critical,
            Outcome::BadRequest { .. }
            | Outcome::Unauthorized { .. }
            | Outcome::UnknownStatus { .. } => Severity::Error,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }

    /// Emit the log line for this outcome.
    fn log(&self) {
        match self {
            Outcome::Success => debug!("response successful"),
            Outcome::QuotaLimitReached { message } => {
                warn!("quota/rate limit reached: {message}")
            }
            // tracing has no level above ERROR
            Outcome::EndpointMoved { message } => {
                error!(critical = true, "URI has changed: {message}")
            }
            Outcome::BadRequest { message } => error!("bad request: {message}"),
            Outcome::Unauthorized { message } => error!("unauthorised request: {message}"),
            Outcome::UnknownStatus { status } => error!(status, "unexpected HTTP status"),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::UnknownStatus { status } => write!(f, "{} ({status})", self.tag()),
            _ => match self.message() {
                Some(message) if !message.is_empty() => write!(f, "{}: {message}", self.tag()),
                _ => f.write_str(self.tag()),
            },
        }
    }
}

/// Classify an HTTP status code, logging at the outcome's severity.
///
/// `message` is only kept for the statuses the API documents; it is
/// discarded for success and for unknown codes.
pub fn classify(status: u16, message: &str) -> Outcome {
    let message = message.to_string();
    let outcome = match status {
        200 => Outcome::Success,
        203 => Outcome::QuotaLimitReached { message },
        301 => Outcome::EndpointMoved { message },
        400 => Outcome::BadRequest { message },
        401 => Outcome::Unauthorized { message },
        status => Outcome::UnknownStatus { status },
    };
    outcome.log();
    outcome
}
