//! Test doubles shared by service and router tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;

use venues_core::cache::{Cache, CacheError, Result as CacheResult};
use venues_core::venues::{Coordinates, Venue, VenueDetails, VenueProvider};

pub fn venue(id: &str, name: &str) -> Venue {
    Venue {
        id: id.to_string(),
        name: name.to_string(),
        address: None,
        latitude: -34.9,
        longitude: -56.2,
        categories: vec!["cafe".to_string()],
    }
}

pub fn details(id: &str, name: &str) -> VenueDetails {
    VenueDetails {
        venue: venue(id, name),
        description: Some("by the sea".to_string()),
        rating: Some(9.0),
        url: None,
    }
}

/// Provider returning canned data and counting calls.
#[derive(Default)]
pub struct StubProvider {
    pub venues: Vec<Venue>,
    pub details: HashMap<String, VenueDetails>,
    pub fail_with: Option<String>,
    calls: AtomicUsize,
}

impl StubProvider {
    pub fn with_venues(venues: Vec<Venue>) -> Self {
        Self {
            venues,
            ..Default::default()
        }
    }

    pub fn with_details(items: Vec<VenueDetails>) -> Self {
        Self {
            details: items
                .into_iter()
                .map(|d| (d.venue.id.clone(), d))
                .collect(),
            ..Default::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.fail_with {
            Some(message) => Err(anyhow!(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl VenueProvider for StubProvider {
    async fn search(&self, _coords: Coordinates) -> anyhow::Result<Vec<Venue>> {
        self.record()?;
        Ok(self.venues.clone())
    }

    async fn details(&self, venue_id: &str) -> anyhow::Result<Option<VenueDetails>> {
        self.record()?;
        Ok(self.details.get(venue_id).cloned())
    }
}

/// Cache whose every operation fails with the given error.
pub struct BrokenCache(pub CacheError);

#[async_trait]
impl Cache for BrokenCache {
    async fn get(&self, _key: &str) -> CacheResult<Option<Vec<u8>>> {
        Err(self.0.clone())
    }

    async fn set(&self, _key: &str, _value: &[u8], _ttl: Duration) -> CacheResult<()> {
        Err(self.0.clone())
    }

    async fn delete(&self, _key: &str) -> CacheResult<()> {
        Err(self.0.clone())
    }
}

/// Cache that serves fixed raw bytes for every key and records writes.
#[derive(Default)]
pub struct FixedCache {
    pub payload: Vec<u8>,
    pub writes: Mutex<Vec<String>>,
}

#[async_trait]
impl Cache for FixedCache {
    async fn get(&self, _key: &str) -> CacheResult<Option<Vec<u8>>> {
        Ok(Some(self.payload.clone()))
    }

    async fn set(&self, key: &str, _value: &[u8], _ttl: Duration) -> CacheResult<()> {
        self.writes.lock().unwrap().push(key.to_string());
        Ok(())
    }

    async fn delete(&self, _key: &str) -> CacheResult<()> {
        Ok(())
    }
}
