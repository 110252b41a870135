//! Venue lookups with a cache in front of the provider.

use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};

use venues_core::cache::{
    deserialize_json, serialize_json, venue_details_key, venues_by_coordinates_key, Cache,
};
use venues_core::error::DomainError;
use venues_core::venues::{Coordinates, Venue, VenueDetails, VenueProvider};

use crate::config::CacheFailurePolicy;

const MAX_VENUE_ID_LEN: usize = 128;

/// Cache-aside venue lookups.
///
/// - **Hit**: the cached payload is returned without calling the provider
/// - **Miss**: the provider is called and a successful answer is cached for `ttl`
/// - **Corrupt payload**: treated as a miss and overwritten
/// - **Cache failure on read**: handled according to [`CacheFailurePolicy`]
/// - **Cache failure on write**: logged, the answer is still returned
///
/// Concurrent misses for the same key each call the provider; there is no
/// request coalescing.
pub struct VenueService {
    cache: Arc<dyn Cache>,
    provider: Arc<dyn VenueProvider>,
    ttl: Duration,
    on_cache_failure: CacheFailurePolicy,
}

impl VenueService {
    pub fn new(
        cache: Arc<dyn Cache>,
        provider: Arc<dyn VenueProvider>,
        ttl: Duration,
        on_cache_failure: CacheFailurePolicy,
    ) -> Self {
        Self {
            cache,
            provider,
            ttl,
            on_cache_failure,
        }
    }

    /// Venues near `coords`.
    pub async fn venues_by_coordinates(
        &self,
        coords: Coordinates,
    ) -> Result<Vec<Venue>, DomainError> {
        let key = venues_by_coordinates_key(coords);

        if let Some(venues) = self.read_cached::<Vec<Venue>>(&key).await? {
            return Ok(venues);
        }

        let venues = self
            .provider
            .search(coords)
            .await
            .map_err(|err| upstream_error("venue search is unavailable", err))?;

        self.store(&key, &venues).await;
        tracing::debug!(%coords, count = venues.len(), "Venues fetched from provider");
        Ok(venues)
    }

    /// Details for a single venue.
    ///
    /// Unknown ids are `NotFound` and are not cached.
    pub async fn venue_details(&self, venue_id: &str) -> Result<VenueDetails, DomainError> {
        let venue_id = venue_id.trim();
        if venue_id.is_empty() {
            return Err(DomainError::invalid_input("venue id must not be empty"));
        }
        if venue_id.len() > MAX_VENUE_ID_LEN {
            return Err(DomainError::invalid_input(format!(
                "venue id must be at most {MAX_VENUE_ID_LEN} bytes"
            )));
        }

        let key = venue_details_key(venue_id);

        if let Some(details) = self.read_cached::<VenueDetails>(&key).await? {
            return Ok(details);
        }

        let details = self
            .provider
            .details(venue_id)
            .await
            .map_err(|err| upstream_error("venue details are unavailable", err))?
            .ok_or_else(|| DomainError::not_found(format!("venue {venue_id} not found")))?;

        self.store(&key, &details).await;
        tracing::debug!(venue_id, "Venue details fetched from provider");
        Ok(details)
    }

    async fn read_cached<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, DomainError> {
        match self.cache.get(key).await {
            Ok(Some(bytes)) => match deserialize_json::<T>(&bytes) {
                Ok(value) => {
                    tracing::trace!(key, "Cache hit");
                    Ok(Some(value))
                }
                Err(err) => {
                    // Corrupt entries are overwritten by the next successful fetch
                    tracing::warn!(key, error = %err, "Cached payload could not be decoded");
                    Ok(None)
                }
            },
            Ok(None) => {
                tracing::trace!(key, "Cache miss");
                Ok(None)
            }
            Err(err)
                if err.is_unavailable() && self.on_cache_failure == CacheFailurePolicy::FailFast =>
            {
                Err(DomainError::from(err))
            }
            Err(err) => {
                tracing::warn!(key, error = %err, "Cache read failed, falling back to provider");
                Ok(None)
            }
        }
    }

    async fn store<T: Serialize>(&self, key: &str, value: &T) {
        let bytes = match serialize_json(value) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(key, error = %err, "Failed to encode value for cache");
                return;
            }
        };
        if let Err(err) = self.cache.set(key, &bytes, self.ttl).await {
            tracing::warn!(key, error = %err, "Failed to cache value");
        }
    }
}

/// Wraps a provider failure, keeping an error the provider already typed.
fn upstream_error(message: &str, err: anyhow::Error) -> DomainError {
    match err.downcast::<DomainError>() {
        Ok(domain) => domain,
        Err(err) => DomainError::upstream_unavailable(message).with_anyhow(err),
    }
}
