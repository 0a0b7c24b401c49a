//! Normalized geographic point type.

use std::fmt;

use serde::Serialize;

use crate::error::ParseError;

const LAT_RANGE: (f64, f64) = (-90.0, 90.0);
const LON_RANGE: (f64, f64) = (-180.0, 180.0);

/// Which half of a coordinate pair a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Latitude => write!(f, "latitude"),
            Axis::Longitude => write!(f, "longitude"),
        }
    }
}

/// A `(latitude, longitude)` pair in decimal degrees.
///
/// Latitude is always within `[-90, 90]` and longitude within `[-180, 180]`;
/// [`GeoPoint::new`] is the only public constructor and enforces both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    lat: f64,
    lon: f64,
}

impl GeoPoint {
    /// Builds a point after checking both values against their ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::OutOfRange`] if either value is outside its
    /// range or is not finite.
    pub fn new(lat: f64, lon: f64) -> Result<Self, ParseError> {
        let lat = check_range(Axis::Latitude, lat, LAT_RANGE)?;
        let lon = check_range(Axis::Longitude, lon, LON_RANGE)?;
        Ok(Self { lat, lon })
    }

    /// Caller guarantees the values are in range.
    pub(crate) const fn from_raw(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    #[must_use]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    #[must_use]
    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lon)
    }
}

fn check_range(axis: Axis, value: f64, (min, max): (f64, f64)) -> Result<f64, ParseError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ParseError::OutOfRange {
            axis,
            value,
            min,
            max,
        })
    }
}
