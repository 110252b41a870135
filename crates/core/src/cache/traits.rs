use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// Trait for basic cache operations.
///
/// Implementations must be safe to share between tasks without any external
/// locking. Values are opaque bytes; callers own the encoding.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value from the cache by key.
    ///
    /// Returns `Ok(None)` both when the key was never set and when it has
    /// expired. A backend that cannot be reached returns
    /// [`CacheError::Unavailable`](super::CacheError::Unavailable) instead.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Inserts or overwrites a value that expires after `ttl`.
    ///
    /// A zero `ttl` is rejected with
    /// [`CacheError::InvalidTtl`](super::CacheError::InvalidTtl).
    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()>;

    /// Deletes a value from the cache by key. Absent keys are not an error.
    async fn delete(&self, key: &str) -> Result<()>;
}

/// Validates a TTL before it reaches a backend.
pub fn ensure_ttl(ttl: Duration) -> Result<()> {
    if ttl.is_zero() {
        return Err(super::CacheError::InvalidTtl);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheError;

    #[test]
    fn test_ensure_ttl_rejects_zero() {
        assert_eq!(ensure_ttl(Duration::ZERO), Err(CacheError::InvalidTtl));
    }

    #[test]
    fn test_ensure_ttl_accepts_positive() {
        assert!(ensure_ttl(Duration::from_millis(1)).is_ok());
    }
}
