//! Seams between the pipeline and the external mapping service.
//!
//! Distance and region lookups never fail from the caller's point of view:
//! implementations log transport errors and degrade to
//! [`DistanceResult::Unresolved`] or [`UNKNOWN_REGION`](crate::UNKNOWN_REGION).
//! Forward geocoding is only used to locate the office, where a failure is
//! fatal, so it returns its error.

use std::future::Future;

use crate::geo::GeoPoint;
use crate::mileage::DistanceResult;

pub trait RoutingProvider {
    /// Driving distance in miles (two decimals) along the shortest route.
    fn driving_distance_miles(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> impl Future<Output = DistanceResult> + Send;
}

pub trait RegionProvider {
    /// Name of the administrative region containing `point`, or `"Unknown"`.
    fn region_name(&self, point: GeoPoint) -> impl Future<Output = String> + Send;
}

pub trait AddressGeocoder {
    type Error: std::error::Error + Send + Sync + 'static;

    /// First matching point for a free-text address, `None` if nothing matched.
    fn geocode_address(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<Option<GeoPoint>, Self::Error>> + Send;
}
