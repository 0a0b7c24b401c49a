//! Pipeline provider implementations for [`MapboxClient`].
//!
//! Distance and region lookups swallow transport errors here, after logging
//! them, so a bad row can never abort its siblings.

use bidmiles_core::{
    meters_to_miles, AddressGeocoder, DistanceResult, GeoPoint, RegionProvider, RoutingProvider,
    UNKNOWN_REGION,
};

use crate::client::MapboxClient;
use crate::error::MapboxError;

impl RoutingProvider for MapboxClient {
    async fn driving_distance_miles(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> DistanceResult {
        match self.driving_distance_meters(origin, destination).await {
            Ok(Some(meters)) => DistanceResult::Miles(meters_to_miles(meters)),
            Ok(None) => DistanceResult::Unresolved,
            Err(e) => {
                tracing::warn!(error = %e, %destination, "directions lookup failed");
                DistanceResult::Unresolved
            }
        }
    }
}

impl RegionProvider for MapboxClient {
    async fn region_name(&self, point: GeoPoint) -> String {
        match self.reverse_region(point).await {
            Ok(Some(name)) => name,
            Ok(None) => UNKNOWN_REGION.to_owned(),
            Err(e) => {
                tracing::warn!(error = %e, %point, "region lookup failed");
                UNKNOWN_REGION.to_owned()
            }
        }
    }
}

impl AddressGeocoder for MapboxClient {
    type Error = MapboxError;

    async fn geocode_address(&self, address: &str) -> Result<Option<GeoPoint>, MapboxError> {
        self.forward_geocode(address).await
    }
}
