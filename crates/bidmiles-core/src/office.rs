//! The fixed origin every distance is measured from.

use crate::error::OfficeError;
use crate::geo::GeoPoint;
use crate::provider::AddressGeocoder;

/// Crescent, OK.
const DEFAULT_OFFICE: GeoPoint = GeoPoint::from_raw(35.8239, -97.5920);

/// Where the office location comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum OfficeSource {
    Point(GeoPoint),
    /// Street address geocoded once at startup.
    Address(String),
}

impl Default for OfficeSource {
    fn default() -> Self {
        OfficeSource::Point(DEFAULT_OFFICE)
    }
}

/// A resolved office point. Construct once per run and pass it by value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OfficeLocation {
    point: GeoPoint,
}

impl OfficeLocation {
    #[must_use]
    pub fn from_point(point: GeoPoint) -> Self {
        Self { point }
    }

    #[must_use]
    pub fn point(&self) -> GeoPoint {
        self.point
    }

    /// Resolves `source`, geocoding it if it is an address.
    ///
    /// # Errors
    ///
    /// - [`OfficeError::NoFeatures`] if the geocoder matched nothing.
    /// - [`OfficeError::Provider`] if the geocoder request failed.
    pub async fn resolve<G>(source: &OfficeSource, geocoder: &G) -> Result<Self, OfficeError>
    where
        G: AddressGeocoder,
    {
        let address = match source {
            OfficeSource::Point(point) => return Ok(Self::from_point(*point)),
            OfficeSource::Address(address) => address,
        };

        let found = geocoder
            .geocode_address(address)
            .await
            .map_err(|e| OfficeError::Provider {
                address: address.clone(),
                source: Box::new(e),
            })?;

        let point = found.ok_or_else(|| OfficeError::NoFeatures {
            address: address.clone(),
        })?;
        tracing::info!(%address, %point, "resolved office address");
        Ok(Self::from_point(point))
    }
}
