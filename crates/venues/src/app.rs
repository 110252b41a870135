use std::time::Duration;

use axum::{http::StatusCode, middleware, routing::get, Router};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    handlers::{
        error::route_not_found,
        health::ping,
        venues::{venue_details, venues_by_coordinates},
    },
    middleware::{handle_errors, request_context},
    state::AppState,
};

/// Upper bound for a whole request, above the provider's own timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(35);

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/venues/{coords}", get(venues_by_coordinates))
        .route("/venues/details/{id}", get(venue_details))
        .fallback(route_not_found)
        .layer(middleware::from_fn(handle_errors))
        .layer(middleware::from_fn(request_context))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ))
        .with_state(state)
}
