//! In-memory cache implementation with TTL, LRU bound and periodic sweeping.
//!
//! Entries are checked against their deadline on every read, so a key is
//! never returned after it expires even if the sweeper has not run yet. The
//! sweeper exists to free memory held by keys nobody reads again.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::Mutex;
use tokio::time::Instant;

use venues_core::cache::{ensure_ttl, Cache, CacheError, Result};

use super::sweeper::Sweeper;

/// A single cache entry with its expiration deadline.
#[derive(Debug, Clone)]
pub(super) struct CacheEntry {
    value: Vec<u8>,
    expires_at: Instant,
}

impl CacheEntry {
    /// Returns true while the entry is still visible at `now`.
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

pub(super) type Store = Mutex<LruCache<String, CacheEntry>>;

/// Removes every entry that has expired. Returns how many were removed.
pub(super) async fn sweep_expired(store: &Store) -> usize {
    let now = Instant::now();
    let mut store = store.lock().await;

    let expired: Vec<String> = store
        .iter()
        .filter(|(_, entry)| !entry.is_live(now))
        .map(|(key, _)| key.clone())
        .collect();

    for key in &expired {
        store.pop(key);
    }

    expired.len()
}

/// In-memory cache with per-entry TTL.
///
/// Thread-safe through a single `tokio::sync::Mutex` around an `LruCache`;
/// every insert or overwrite happens entirely under the lock. When
/// `max_entries` is reached the least recently used entry is evicted, which
/// callers observe as an ordinary miss.
///
/// Cloning is cheap and all clones share the same store. The background
/// sweeper stops on [`MemoryCache::shutdown`] or when the last clone is
/// dropped.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    store: Arc<Store>,
    sweeper: Arc<Sweeper>,
}

impl MemoryCache {
    /// Creates a new in-memory cache and starts its sweeper.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Arguments
    ///
    /// * `max_entries` - Maximum number of entries before LRU eviction kicks in.
    /// * `cleanup_interval` - How often expired entries are swept.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::InvalidConfig` if either argument is zero.
    pub fn new(max_entries: usize, cleanup_interval: Duration) -> Result<Self> {
        let capacity = NonZeroUsize::new(max_entries)
            .ok_or_else(|| CacheError::InvalidConfig("max_entries must be > 0".to_string()))?;
        if cleanup_interval.is_zero() {
            return Err(CacheError::InvalidConfig(
                "cleanup_interval must be > 0".to_string(),
            ));
        }

        let store = Arc::new(Mutex::new(LruCache::new(capacity)));
        let sweeper = Sweeper::spawn(Arc::downgrade(&store), cleanup_interval);

        tracing::info!(
            max_entries,
            cleanup_interval_secs = cleanup_interval.as_secs_f64(),
            "In-memory cache ready"
        );

        Ok(Self {
            store,
            sweeper: Arc::new(sweeper),
        })
    }

    /// Number of entries physically held, including expired ones the
    /// sweeper has not reached yet.
    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    /// Stops the sweeper and waits for it to finish.
    pub async fn shutdown(&self) {
        self.sweeper.stop().await;
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let now = Instant::now();
        let mut store = self.store.lock().await;

        let Some(entry) = store.get(key) else {
            return Ok(None);
        };
        if entry.is_live(now) {
            return Ok(Some(entry.value.clone()));
        }

        // Expired but not swept yet
        store.pop(key);
        Ok(None)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()> {
        ensure_ttl(ttl)?;
        let expires_at = Instant::now()
            .checked_add(ttl)
            .ok_or(CacheError::InvalidTtl)?;

        let entry = CacheEntry {
            value: value.to_vec(),
            expires_at,
        };
        self.store.lock().await.put(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.store.lock().await.pop(key);
        Ok(())
    }
}
