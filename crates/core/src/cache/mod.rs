mod error;
mod keys;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{venue_details_key, venues_by_coordinates_key};
pub use serialization::{deserialize_json, serialize_json, SerializationError};
pub use traits::{ensure_ttl, Cache};
