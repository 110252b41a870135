//! Request-scoped middleware.
//!
//! `request_context` must wrap `handle_errors` so the context exists by the
//! time a failed response is rendered.

use axum::{
    extract::Request,
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use venues_core::context::{RequestContext, RequestId};
use venues_core::error::handle_as_response;

use crate::handlers::FailedRequest;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Attaches a [`RequestContext`] to the request and echoes its id.
///
/// A valid UUID in `x-request-id` is reused; anything else gets a fresh id.
pub async fn request_context(mut request: Request, next: Next) -> Response {
    let request_id = RequestId::parse_or_new(
        request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok()),
    );
    request
        .extensions_mut()
        .insert(RequestContext::new(request_id));

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// Renders handler errors as JSON error bodies.
pub async fn handle_errors(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let ctx = request
        .extensions()
        .get::<RequestContext>()
        .cloned()
        .unwrap_or_default();

    let mut response = next.run(request).await;
    let Some(FailedRequest(err)) = response.extensions_mut().remove::<FailedRequest>() else {
        return response;
    };

    let rendered = handle_as_response(&ctx, &err, method.as_str(), &path);
    let status =
        StatusCode::from_u16(rendered.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(rendered.body)).into_response()
}
