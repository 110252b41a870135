//! In-memory cache backend implementation.
//!
//! Provides a thread-safe in-memory cache with TTL support and a background
//! sweeper for single-instance deployments.

mod cache;
mod sweeper;

pub use cache::MemoryCache;
