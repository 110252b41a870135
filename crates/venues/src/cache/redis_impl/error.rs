//! Redis error mapping to CacheError.

use std::time::Duration;

use venues_core::cache::CacheError;

use crate::time::millis;

/// Maps Redis errors to CacheError.
///
/// Anything that means the server could not be talked to becomes
/// `Unavailable`; errors returned by a reachable server are
/// `OperationFailed`.
pub fn map_redis_error(err: redis::RedisError) -> CacheError {
    if err.is_connection_refusal()
        || err.is_timeout()
        || err.is_connection_dropped()
        || err.is_io_error()
    {
        CacheError::Unavailable(err.to_string())
    } else {
        CacheError::OperationFailed(err.to_string())
    }
}

/// Error for an operation that did not complete within its deadline.
pub fn timed_out(op: &str, after: Duration) -> CacheError {
    CacheError::Unavailable(format!("{op} timed out after {}ms", millis(after)))
}
