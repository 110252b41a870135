//! Redis cache backend implementation.
//!
//! Provides a distributed cache using Redis for multi-instance deployments.
//! Expiration is delegated to Redis itself.

mod cache;
mod error;

pub use cache::RedisCache;
