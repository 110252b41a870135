use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cache::CacheError;
use crate::venues::CoordinatesError;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Closed set of failure categories.
///
/// Adding a new kind of domain failure means adding a variant here, never
/// overloading an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    InvalidInput,
    UpstreamUnavailable,
    Unauthorized,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::UpstreamUnavailable => "upstream_unavailable",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Internal => "internal",
        }
    }

    /// Message used when no safe, caller-facing message is available.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "resource not found",
            ErrorKind::InvalidInput => "invalid input",
            ErrorKind::UpstreamUnavailable => "a required upstream service is unavailable",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Internal => "internal server error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error produced by a domain service.
///
/// `message` is safe to show to callers. `source` is kept for logs only and
/// never reaches a response body.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct DomainError {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl DomainError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    pub fn upstream_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UpstreamUnavailable, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Attaches the underlying cause.
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attaches an `anyhow` cause, keeping its whole context chain.
    pub fn with_anyhow(self, source: anyhow::Error) -> Self {
        self.with_source(BoxError::from(source))
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }
}

impl From<CacheError> for DomainError {
    fn from(err: CacheError) -> Self {
        let kind = match err {
            CacheError::InvalidTtl => ErrorKind::InvalidInput,
            CacheError::Unavailable(_) => ErrorKind::UpstreamUnavailable,
            CacheError::OperationFailed(_)
            | CacheError::Serialization(_)
            | CacheError::InvalidConfig(_) => ErrorKind::Internal,
        };
        let message = match err {
            CacheError::InvalidTtl => "cache ttl must be greater than zero",
            CacheError::Unavailable(_) => "cache backend is unavailable",
            _ => kind.default_message(),
        };
        DomainError::new(kind, message).with_source(err)
    }
}

impl From<CoordinatesError> for DomainError {
    fn from(err: CoordinatesError) -> Self {
        DomainError::invalid_input(err.to_string())
    }
}
