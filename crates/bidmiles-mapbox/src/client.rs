//! HTTP client for the Mapbox Directions and Geocoding APIs.
//!
//! One request per lookup, no retries. The access token travels as the
//! `access_token` query parameter and is stripped from errors before they
//! are logged.

use std::time::Duration;

use bidmiles_core::GeoPoint;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::MapboxError;
use crate::types::{DirectionsResponse, GeocodingResponse};

const DEFAULT_BASE_URL: &str = "https://api.mapbox.com/";

/// Client for the Mapbox REST APIs.
///
/// Use [`MapboxClient::new`] for production or [`MapboxClient::with_base_url`]
/// to point at a mock server in tests.
pub struct MapboxClient {
    client: Client,
    token: String,
    base_url: Url,
}

impl MapboxClient {
    /// Creates a new client pointed at the production Mapbox API.
    ///
    /// # Errors
    ///
    /// Returns [`MapboxError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(token: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, MapboxError> {
        Self::with_base_url(token, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`MapboxError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`MapboxError::InvalidBaseUrl`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        token: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, MapboxError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so relative joins append to the path
        // instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| MapboxError::InvalidBaseUrl(format!("'{base_url}': {e}")))?;

        Ok(Self {
            client,
            token: token.to_owned(),
            base_url,
        })
    }

    /// Driving distance in meters of the first route between two points.
    ///
    /// Returns `Ok(None)` when Mapbox answers but offers no usable route.
    ///
    /// # Errors
    ///
    /// - [`MapboxError::Http`] on network failure or non-2xx HTTP status.
    /// - [`MapboxError::Deserialize`] if the body is not a directions response.
    pub async fn driving_distance_meters(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<Option<f64>, MapboxError> {
        let url = self.directions_url(origin, destination)?;
        let body: DirectionsResponse = self.request_json(&url, "directions").await?;

        let meters = body.first_route_meters();
        if meters.is_none() {
            tracing::debug!(
                code = body.code.as_deref().unwrap_or(""),
                message = body.message.as_deref().unwrap_or(""),
                %destination,
                "directions returned no usable route"
            );
        }
        Ok(meters)
    }

    /// Forward-geocodes a free-text address to its best-matching point.
    ///
    /// # Errors
    ///
    /// - [`MapboxError::Http`] on network failure or non-2xx HTTP status.
    /// - [`MapboxError::Deserialize`] if the body is not a geocoding response.
    pub async fn forward_geocode(&self, address: &str) -> Result<Option<GeoPoint>, MapboxError> {
        let url = self.geocoding_url(&encode_query(address), &[("limit", "1")])?;
        let body: GeocodingResponse = self.request_json(&url, "forward geocode").await?;
        Ok(body.features.first().and_then(crate::types::Feature::point))
    }

    /// Reverse-geocodes `point` to the short name of its enclosing region
    /// (state or province).
    ///
    /// # Errors
    ///
    /// - [`MapboxError::Http`] on network failure or non-2xx HTTP status.
    /// - [`MapboxError::Deserialize`] if the body is not a geocoding response.
    pub async fn reverse_region(&self, point: GeoPoint) -> Result<Option<String>, MapboxError> {
        let query = format!("{},{}", point.lon(), point.lat());
        let url = self.geocoding_url(&query, &[("types", "region"), ("limit", "1")])?;
        let body: GeocodingResponse = self.request_json(&url, "reverse geocode").await?;
        Ok(body
            .features
            .first()
            .and_then(|f| f.short_name())
            .map(str::to_owned))
    }

    /// `directions/v5/mapbox/driving/{lon},{lat};{lon},{lat}` with route
    /// geometry suppressed.
    fn directions_url(&self, origin: GeoPoint, destination: GeoPoint) -> Result<Url, MapboxError> {
        let path = format!(
            "directions/v5/mapbox/driving/{},{};{},{}",
            origin.lon(),
            origin.lat(),
            destination.lon(),
            destination.lat()
        );
        self.build_url(
            &path,
            &[("overview", "false"), ("geometries", "geojson")],
        )
    }

    /// `geocoding/v5/mapbox.places/{query}.json`. `query` must already be
    /// safe as a single path segment.
    fn geocoding_url(&self, query: &str, extra: &[(&str, &str)]) -> Result<Url, MapboxError> {
        self.build_url(&format!("geocoding/v5/mapbox.places/{query}.json"), extra)
    }

    fn build_url(&self, path: &str, extra: &[(&str, &str)]) -> Result<Url, MapboxError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| {
                MapboxError::InvalidBaseUrl(format!("'{}' + '{path}': {e}", self.base_url))
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("access_token", &self.token);
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the response
    /// body as `T`.
    async fn request_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<T, MapboxError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| MapboxError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

/// Percent-encodes free text so it stays one path segment.
fn encode_query(text: &str) -> String {
    utf8_percent_encode(text, NON_ALPHANUMERIC).to_string()
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
