//! Clients for the external venue provider.

mod rest;

pub use rest::RestVenueProvider;
