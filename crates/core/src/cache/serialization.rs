//! Pure functions for serializing/deserializing domain types to/from cache bytes.
//!
//! These functions use JSON serialization for cache storage, providing human-readable
//! cache values that are easy to debug and inspect.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use super::CacheError;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

impl From<SerializationError> for CacheError {
    fn from(err: SerializationError) -> Self {
        CacheError::Serialization(err.to_string())
    }
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes any value to JSON bytes.
pub fn serialize_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes produced by [`serialize_json`].
pub fn deserialize_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}
