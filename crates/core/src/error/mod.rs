//! Domain error taxonomy and the single translation step from any error to
//! a client-safe response.
//!
//! Services produce [`DomainError`]s (or errors that convert into one, such
//! as [`CacheError`](crate::cache::CacheError)); everything else that reaches
//! [`handle_as_response`] is treated as [`ErrorKind::Internal`].

mod classify;
mod http_mapping;
mod kind;
mod respond;

pub use classify::classify;
pub use http_mapping::{render, status_code, ErrorBody, ErrorResponse};
pub use kind::{DomainError, ErrorKind};
pub use respond::handle_as_response;
