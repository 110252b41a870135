use crate::venues::Coordinates;

/// Returns the cache key for a venue search around a coordinate pair.
///
/// Coordinates are formatted with a fixed precision so that the same request
/// always lands on the same key regardless of how the numbers were written
/// in the URL (`1.5` and `1.500000` hit the same entry).
pub fn venues_by_coordinates_key(coords: Coordinates) -> String {
    format!(
        "venues:coords:{:.6}:{:.6}",
        coords.latitude(),
        coords.longitude()
    )
}

/// Returns the cache key for a single venue's details.
pub fn venue_details_key(venue_id: &str) -> String {
    format!("venues:details:{}", venue_id)
}
