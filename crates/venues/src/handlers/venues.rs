//! Venue lookup handlers.

use axum::{extract::State, Json};

use venues_core::error::DomainError;
use venues_core::venues::{Coordinates, Venue, VenueDetails};

use crate::handlers::{AppError, PathParam};
use crate::state::AppState;

/// GET /venues/{coords} - Venues near `lat,lng`.
#[axum::debug_handler]
pub async fn venues_by_coordinates(
    State(state): State<AppState>,
    PathParam(coords): PathParam<String>,
) -> Result<Json<Vec<Venue>>, AppError> {
    let coords: Coordinates = coords.parse().map_err(DomainError::from)?;
    let venues = state.venues.venues_by_coordinates(coords).await?;
    Ok(Json(venues))
}

/// GET /venues/details/{id} - Details for a single venue.
#[axum::debug_handler]
pub async fn venue_details(
    State(state): State<AppState>,
    PathParam(venue_id): PathParam<String>,
) -> Result<Json<VenueDetails>, AppError> {
    let details = state.venues.venue_details(&venue_id).await?;
    Ok(Json(details))
}
