//! Shared application state passed to every handler.

use std::sync::Arc;

use crate::service::VenueService;

#[derive(Clone)]
pub struct AppState {
    pub venues: Arc<VenueService>,
}

impl AppState {
    pub fn new(venues: VenueService) -> Self {
        Self {
            venues: Arc::new(venues),
        }
    }
}
