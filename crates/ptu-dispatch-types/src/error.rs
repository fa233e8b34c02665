// Error hierarchy — single error type for the entire crate.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Discriminator for every failure the dispatcher can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    // Deployment errors (from HTTP responses)
    Authentication,
    AccessDenied,
    NotFound,
    InvalidRequest,
    RateLimit,
    Server,

    // Client-side errors
    RequestTimeout,
    Network,
    Protocol,
    Configuration,
}

/// The single error type for the crate.
///
/// Only `RateLimit` is interpreted by the dispatcher; every other kind is
/// opaque and passed through to the caller unchanged.
#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,

    /// Deployment that produced the failure, when known.
    pub deployment: Option<String>,
    pub status_code: Option<u16>,
    /// Server-suggested wait before retrying, extracted from rate-limit
    /// headers. Required on `RateLimit` failures the dispatcher acts on.
    pub retry_after: Option<Duration>,
}

impl Error {
    /// Construct from an HTTP status code (for transport implementors).
    pub fn from_http_status(
        status: u16,
        message: String,
        deployment: &str,
        retry_after: Option<Duration>,
    ) -> Self {
        let kind = match status {
            400 | 422 => ErrorKind::InvalidRequest,
            401 => ErrorKind::Authentication,
            403 => ErrorKind::AccessDenied,
            404 => ErrorKind::NotFound,
            408 => ErrorKind::RequestTimeout,
            429 => ErrorKind::RateLimit,
            _ => ErrorKind::Server,
        };

        Self {
            kind,
            message,
            source: None,
            deployment: Some(deployment.to_string()),
            status_code: Some(status),
            retry_after,
        }
    }

    /// Convenience: rate-limit failure with an optional retry hint.
    pub fn rate_limited(deployment: &str, retry_after: Option<Duration>) -> Self {
        Self {
            kind: ErrorKind::RateLimit,
            message: format!("deployment '{deployment}' is rate limited"),
            source: None,
            deployment: Some(deployment.to_string()),
            status_code: Some(429),
            retry_after,
        }
    }

    /// Convenience: protocol error (a required field is missing or
    /// unparseable, e.g. a rate-limit response without a retry hint).
    pub fn protocol(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Protocol,
            message: message.into(),
            source: None,
            deployment: None,
            status_code: None,
            retry_after: None,
        }
    }

    /// Convenience: configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Configuration,
            message: message.into(),
            source: None,
            deployment: None,
            status_code: None,
            retry_after: None,
        }
    }

    /// Convenience: network error with source.
    pub fn network(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind: ErrorKind::Network,
            message: message.into(),
            source: Some(Box::new(source)),
            deployment: None,
            status_code: None,
            retry_after: None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}
