mod coordinates;
mod traits;
mod types;

pub use coordinates::{Coordinates, CoordinatesError};
pub use traits::VenueProvider;
pub use types::{Venue, VenueDetails};
