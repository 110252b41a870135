//! Redis cache implementation.
//!
//! One `ConnectionManager` is created at startup and cloned for each call;
//! it reconnects on its own after the server comes back. Every command is
//! bounded by `op_timeout`, so an unreachable server turns into
//! `CacheError::Unavailable` instead of a hung request.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::{AsyncCommands, IntoConnectionInfo};

use venues_core::cache::{ensure_ttl, Cache, Result};

use super::error::{map_redis_error, timed_out};
use crate::time::millis;

/// Redis cache backend using connection manager for pooling.
pub struct RedisCache {
    conn: redis::aio::ConnectionManager,
    op_timeout: Duration,
}

impl RedisCache {
    /// Connects to Redis.
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., "redis://localhost:6379")
    /// * `password` - Password to use when it is not part of the URL
    /// * `op_timeout` - Upper bound for connecting and for every command
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Unavailable` if the server cannot be reached and
    /// `CacheError::OperationFailed` if the URL is invalid.
    pub async fn connect(url: &str, password: Option<&str>, op_timeout: Duration) -> Result<Self> {
        let mut info = url.into_connection_info().map_err(map_redis_error)?;
        if let Some(password) = password {
            info.redis.password = Some(password.to_string());
        }

        let client = redis::Client::open(info).map_err(map_redis_error)?;
        let conn = tokio::time::timeout(op_timeout, redis::aio::ConnectionManager::new(client))
            .await
            .map_err(|_| timed_out("CONNECT", op_timeout))?
            .map_err(map_redis_error)?;

        tracing::info!(
            op_timeout_ms = millis(op_timeout),
            "Redis cache connected"
        );

        Ok(Self { conn, op_timeout })
    }

    /// Runs a command future under the operation timeout.
    async fn bounded<T, F>(&self, op: &str, fut: F) -> Result<T>
    where
        F: Future<Output = redis::RedisResult<T>>,
    {
        match tokio::time::timeout(self.op_timeout, fut).await {
            Ok(result) => result.map_err(map_redis_error),
            Err(_) => Err(timed_out(op, self.op_timeout)),
        }
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        self.bounded("GET", async move { conn.get::<_, Option<Vec<u8>>>(key).await })
            .await
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()> {
        ensure_ttl(ttl)?;
        // PX keeps millisecond precision; sub-millisecond TTLs round up
        let ttl_ms = millis(ttl).max(1);

        let mut conn = self.conn.clone();
        self.bounded("SET", async move {
            conn.pset_ex::<_, _, ()>(key, value, ttl_ms).await
        })
        .await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        self.bounded("DEL", async move { conn.del::<_, ()>(key).await })
            .await
    }
}
