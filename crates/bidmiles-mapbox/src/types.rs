//! Mapbox API response types.
//!
//! Only the fields the client reads are modelled; everything else in the
//! payload is ignored.

use bidmiles_core::GeoPoint;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Directions
// ---------------------------------------------------------------------------

/// Response from `directions/v5/mapbox/driving/...`.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    /// `"Ok"` on success, otherwise e.g. `"NoRoute"`.
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
pub struct Route {
    /// Meters.
    pub distance: f64,
}

impl DirectionsResponse {
    /// Distance of the first route in meters, if it is usable.
    #[must_use]
    pub fn first_route_meters(&self) -> Option<f64> {
        self.routes
            .first()
            .map(|r| r.distance)
            .filter(|m| m.is_finite() && *m >= 0.0)
    }
}

// ---------------------------------------------------------------------------
// Geocoding
// ---------------------------------------------------------------------------

/// Response from `geocoding/v5/mapbox.places/...`.
#[derive(Debug, Deserialize)]
pub struct GeocodingResponse {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
pub struct Feature {
    /// Short name, e.g. `"Oklahoma"`.
    #[serde(default)]
    pub text: Option<String>,
    /// `[longitude, latitude]`.
    #[serde(default)]
    pub center: Option<[f64; 2]>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    /// `[longitude, latitude]` for point geometries.
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

impl Feature {
    /// Feature location, preferring `geometry.coordinates` over `center`.
    /// Mapbox orders both as longitude first.
    #[must_use]
    pub fn point(&self) -> Option<GeoPoint> {
        let from_geometry = self
            .geometry
            .as_ref()
            .and_then(|g| match g.coordinates.as_slice() {
                [lon, lat, ..] => Some((*lat, *lon)),
                _ => None,
            });
        let (lat, lon) = from_geometry.or_else(|| self.center.map(|[lon, lat]| (lat, lon)))?;
        GeoPoint::new(lat, lon).ok()
    }

    /// Non-empty short name.
    #[must_use]
    pub fn short_name(&self) -> Option<&str> {
        self.text.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}
