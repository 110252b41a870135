//! Functional core for the venues service.
//!
//! Nothing in here knows about HTTP frameworks or concrete backends. The
//! binary crate supplies cache implementations, the upstream client and the
//! transport, and hands every failure to [`error::handle_as_response`].

pub mod cache;
pub mod context;
pub mod error;
pub mod venues;
