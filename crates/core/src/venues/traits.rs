use async_trait::async_trait;

use super::{Coordinates, Venue, VenueDetails};

/// The slow external dependency the venue service sits in front of.
///
/// Implementations report transport and protocol failures as plain
/// `anyhow` errors; the service decides how to classify them.
#[async_trait]
pub trait VenueProvider: Send + Sync {
    /// Searches for venues near the given coordinates.
    async fn search(&self, coords: Coordinates) -> anyhow::Result<Vec<Venue>>;

    /// Fetches details for a venue. Returns `Ok(None)` when the provider
    /// does not know the id.
    async fn details(&self, venue_id: &str) -> anyhow::Result<Option<VenueDetails>>;
}
