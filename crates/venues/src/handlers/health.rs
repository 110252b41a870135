//! Liveness endpoint.

/// GET /ping - Returns `pong` without touching the cache or the provider.
#[axum::debug_handler]
pub async fn ping() -> &'static str {
    "pong"
}
