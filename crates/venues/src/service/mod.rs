mod venues;

#[cfg(test)]
pub mod testing;

pub use venues::VenueService;
