//! Extractors whose rejections go through the JSON error path.

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use venues_core::error::DomainError;

use super::AppError;

/// `Path` that rejects with an `invalid_input` [`AppError`] instead of
/// axum's plain-text response.
pub struct PathParam<T>(pub T);

impl<S, T> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::from(
                DomainError::invalid_input(rejection.body_text()).with_source(rejection),
            )),
        }
    }
}
