//! Request-scoped context.
//!
//! Created once by whatever entry point receives a call (HTTP middleware,
//! CLI, test), then only read.

use std::fmt;

use uuid::Uuid;

/// Unique identifier for a request, used for tracing and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Adopts a caller-supplied id when it is a valid UUID, otherwise
    /// generates a fresh one.
    pub fn parse_or_new(raw: Option<&str>) -> Self {
        raw.and_then(|s| Uuid::parse_str(s.trim()).ok())
            .map(Self::from_uuid)
            .unwrap_or_default()
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Request-scoped context handed to the error pipeline.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Unique request identifier for tracing.
    pub request_id: RequestId,
}

impl RequestContext {
    pub fn new(request_id: RequestId) -> Self {
        Self { request_id }
    }
}
