//! Integration tests for `MapboxClient` using wiremock HTTP mocks.

use bidmiles_core::{
    AddressGeocoder, DistanceResult, GeoPoint, OfficeError, OfficeLocation, OfficeSource,
    RegionProvider, RoutingProvider, UNKNOWN_REGION,
};
use bidmiles_mapbox::{MapboxClient, MapboxError};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> MapboxClient {
    MapboxClient::with_base_url("test-token", 5, "bidmiles-test/0.1", base_url)
        .expect("client construction should not fail")
}

fn office() -> GeoPoint {
    GeoPoint::new(35.8239, -97.592).unwrap()
}

fn launcher() -> GeoPoint {
    GeoPoint::new(45.490_665, -118.416_46).unwrap()
}

const DIRECTIONS_PATH: &str =
    "/directions/v5/mapbox/driving/-97.592,35.8239;-118.41646,45.490665";

// ---------------------------------------------------------------------------
// Directions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn driving_distance_converts_first_route_to_miles() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(DIRECTIONS_PATH))
        .and(query_param("access_token", "test-token"))
        .and(query_param("overview", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "Ok",
            "routes": [
                { "distance": 1_000_000.0, "duration": 36000.0 },
                { "distance": 5.0, "duration": 1.0 }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let miles = client.driving_distance_miles(office(), launcher()).await;

    assert_eq!(miles, DistanceResult::Miles(621.37));
}

#[tokio::test]
async fn empty_route_list_is_unresolved() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(DIRECTIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "NoRoute",
            "message": "No route found",
            "routes": []
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let meters = client
        .driving_distance_meters(office(), launcher())
        .await
        .expect("empty route list is not an error");
    assert!(meters.is_none());

    let miles = client.driving_distance_miles(office(), launcher()).await;
    assert_eq!(miles, DistanceResult::Unresolved);
}

#[tokio::test]
async fn server_error_degrades_to_unresolved() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let raw = client.driving_distance_meters(office(), launcher()).await;
    assert!(matches!(raw, Err(MapboxError::Http(_))), "{raw:?}");

    let miles = client.driving_distance_miles(office(), launcher()).await;
    assert_eq!(miles, DistanceResult::Unresolved);
}

#[tokio::test]
async fn http_errors_do_not_leak_the_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Not Authorized - Invalid Token"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .driving_distance_meters(office(), launcher())
        .await
        .unwrap_err();
    let rendered = format!("{err} {err:?}");
    assert!(!rendered.contains("test-token"), "{rendered}");
}

#[tokio::test]
async fn malformed_body_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let raw = client.driving_distance_meters(office(), launcher()).await;
    assert!(matches!(raw, Err(MapboxError::Deserialize { .. })), "{raw:?}");
}

// ---------------------------------------------------------------------------
// Reverse geocoding
// ---------------------------------------------------------------------------

#[tokio::test]
async fn region_name_returns_first_feature_text() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocoding/v5/mapbox.places/-118.41646,45.490665.json"))
        .and(query_param("types", "region"))
        .and(query_param("access_token", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "FeatureCollection",
            "features": [
                { "id": "region.1", "text": "Oregon", "place_name": "Oregon, United States" },
                { "id": "region.2", "text": "Washington" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert_eq!(client.region_name(launcher()).await, "Oregon");
}

#[tokio::test]
async fn region_name_without_features_is_unknown() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "features": [] })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert_eq!(client.region_name(launcher()).await, UNKNOWN_REGION);
}

#[tokio::test]
async fn region_name_on_transport_failure_is_unknown() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert_eq!(client.region_name(launcher()).await, UNKNOWN_REGION);
}

// ---------------------------------------------------------------------------
// Forward geocoding / office resolution
// ---------------------------------------------------------------------------

#[tokio::test]
async fn geocode_address_reads_longitude_first_geometry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/geocoding/v5/mapbox.places/100%20Main%20St%2C%20Crescent%2C%20OK.json",
        ))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "features": [{
                "text": "Main St",
                "center": [-97.6, 35.9],
                "geometry": { "type": "Point", "coordinates": [-97.592, 35.8239] }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let found = client
        .geocode_address("100 Main St, Crescent, OK")
        .await
        .expect("geocode should succeed");
    assert_eq!(found, Some(office()));
}

#[tokio::test]
async fn office_resolution_fails_when_geocoder_finds_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "features": [] })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let source = OfficeSource::Address("nowhere at all".to_owned());
    let err = OfficeLocation::resolve(&source, &client).await.unwrap_err();
    assert!(matches!(err, OfficeError::NoFeatures { .. }), "{err:?}");
}

#[tokio::test]
async fn office_resolution_fails_on_provider_fault() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let source = OfficeSource::Address("100 Main St, Crescent, OK".to_owned());
    let err = OfficeLocation::resolve(&source, &client).await.unwrap_err();
    assert!(matches!(err, OfficeError::Provider { .. }), "{err:?}");
}
