pub mod error;
pub mod extract;
pub mod health;
pub mod venues;

pub use error::{AppError, FailedRequest};
pub use extract::PathParam;
