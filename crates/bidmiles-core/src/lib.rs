//! Core types and pipeline for bid mileage calculation.
//!
//! Everything here is transport-agnostic: coordinate parsing, mileage
//! arithmetic, office resolution and the [`MileageAggregator`] are generic
//! over the provider traits in [`provider`], which the Mapbox client crate
//! implements.

pub mod aggregator;
pub mod app_config;
pub mod config;
pub mod coords;
pub mod error;
pub mod geo;
pub mod mileage;
pub mod office;
pub mod provider;

pub use aggregator::{MileageAggregator, PipelineOptions};
pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use coords::parse_coordinates;
pub use error::{ConfigError, OfficeError, ParseError};
pub use geo::{Axis, GeoPoint};
pub use mileage::{
    meters_to_miles, round2, DistanceResult, Endpoint, MileageRecord, RecordInput, RecordIssue,
    METERS_PER_MILE, UNKNOWN_REGION,
};
pub use office::{OfficeLocation, OfficeSource};
pub use provider::{AddressGeocoder, RegionProvider, RoutingProvider};
