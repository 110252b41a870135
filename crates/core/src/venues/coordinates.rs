use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors that can occur when parsing or validating coordinates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoordinatesError {
    #[error("Coordinates must be written as 'latitude,longitude'")]
    Malformed,
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
    #[error("Latitude must be between -90 and 90, got {0}")]
    LatitudeOutOfRange(f64),
    #[error("Longitude must be between -180 and 180, got {0}")]
    LongitudeOutOfRange(f64),
}

/// A validated latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Creates a coordinate pair, rejecting values outside the valid ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinatesError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinatesError::LatitudeOutOfRange(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinatesError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl FromStr for Coordinates {
    type Err = CoordinatesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s.split_once(',').ok_or(CoordinatesError::Malformed)?;
        let parse = |part: &str| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| CoordinatesError::InvalidNumber(part.trim().to_string()))
        };
        Self::new(parse(lat)?, parse(lng)?)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}
