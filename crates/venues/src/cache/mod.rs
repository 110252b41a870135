//! Cache backend implementations.
//!
//! This module provides concrete implementations of the cache trait
//! defined in `venues_core::cache`. Both backends are always compiled; the
//! one to use is chosen once at startup from configuration.
//!
//! - `memory`: in-process cache with a background sweeper
//! - `redis`: Redis cache with server-side expiration

pub mod memory;
pub mod redis_impl;

use std::sync::Arc;

use anyhow::Context;
use venues_core::cache::Cache;

use crate::config::CacheBackend;

pub use memory::MemoryCache;
pub use redis_impl::RedisCache;

/// The cache chosen at startup, shared with every service.
#[derive(Clone)]
pub struct ActiveCache {
    shared: Arc<dyn Cache>,
    /// Kept so the sweeper can be stopped on shutdown.
    memory: Option<MemoryCache>,
}

impl ActiveCache {
    /// Builds the configured backend.
    pub async fn connect(backend: &CacheBackend) -> anyhow::Result<Self> {
        match backend {
            CacheBackend::Memory {
                cleanup_interval,
                max_entries,
            } => {
                let cache = MemoryCache::new(*max_entries, *cleanup_interval)
                    .context("failed to create in-memory cache")?;
                Ok(Self {
                    shared: Arc::new(cache.clone()),
                    memory: Some(cache),
                })
            }
            CacheBackend::Redis {
                url,
                password,
                op_timeout,
            } => {
                let cache = RedisCache::connect(url, password.as_deref(), *op_timeout)
                    .await
                    .context("failed to connect to redis")?;
                Ok(Self {
                    shared: Arc::new(cache),
                    memory: None,
                })
            }
        }
    }

    pub fn backend_name(&self) -> &'static str {
        if self.memory.is_some() {
            "memory"
        } else {
            "redis"
        }
    }

    /// Handle to inject into services.
    pub fn shared(&self) -> Arc<dyn Cache> {
        Arc::clone(&self.shared)
    }

    /// Releases background resources held by the backend.
    pub async fn shutdown(&self) {
        if let Some(memory) = &self.memory {
            memory.shutdown().await;
        }
    }
}
