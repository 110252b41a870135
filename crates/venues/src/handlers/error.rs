//! Handler error type.
//!
//! Handlers return [`AppError`]; it does not render anything itself. The
//! error travels in the response extensions to the `handle_errors`
//! middleware, which has the request context and writes the JSON body.

use std::sync::Arc;

use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use venues_core::error::DomainError;

pub struct AppError(pub anyhow::Error);

/// A handler error waiting to be rendered.
#[derive(Clone)]
pub struct FailedRequest(pub Arc<anyhow::Error>);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Placeholder status, replaced when the error is rendered
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response
            .extensions_mut()
            .insert(FailedRequest(Arc::new(self.0)));
        response
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// Fallback for requests that match no route.
pub async fn route_not_found(uri: Uri) -> AppError {
    AppError::from(DomainError::not_found(format!("no route for {}", uri.path())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use venues_core::error::{classify, ErrorKind};

    #[test]
    fn test_error_is_carried_in_extensions() {
        let response = AppError::from(DomainError::not_found("venue x not found")).into_response();

        let FailedRequest(err) = response.extensions().get::<FailedRequest>().unwrap().clone();
        assert_eq!(classify(&err), ErrorKind::NotFound);
    }
}
