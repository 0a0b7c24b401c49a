//! Mapbox Directions and Geocoding client.

pub mod client;
pub mod error;
mod provider;
pub mod types;

pub use client::MapboxClient;
pub use error::MapboxError;
