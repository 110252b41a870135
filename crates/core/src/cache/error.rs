use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache TTL must be greater than zero")]
    InvalidTtl,
    #[error("Cache backend unavailable: {0}")]
    Unavailable(String),
    #[error("Cache operation failed: {0}")]
    OperationFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid cache configuration: {0}")]
    InvalidConfig(String),
}

impl CacheError {
    /// Returns true when the backend could not be reached at all, as opposed
    /// to a reachable backend rejecting or failing the operation.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, CacheError::Unavailable(_))
    }
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_ttl_display() {
        assert_eq!(
            CacheError::InvalidTtl.to_string(),
            "Cache TTL must be greater than zero"
        );
    }

    #[test]
    fn test_unavailable_display() {
        let error = CacheError::Unavailable("connection refused".to_string());
        assert_eq!(
            error.to_string(),
            "Cache backend unavailable: connection refused"
        );
    }

    #[test]
    fn test_operation_failed_display() {
        let error = CacheError::OperationFailed("WRONGTYPE".to_string());
        assert_eq!(error.to_string(), "Cache operation failed: WRONGTYPE");
    }

    #[test]
    fn test_is_unavailable() {
        assert!(CacheError::Unavailable("timeout".to_string()).is_unavailable());
        assert!(!CacheError::OperationFailed("oops".to_string()).is_unavailable());
        assert!(!CacheError::InvalidTtl.is_unavailable());
    }
}
