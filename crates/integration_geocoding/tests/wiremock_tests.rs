//! Integration tests for the lookup clients (wiremock-based)

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use integration_geocoding::{
    GeocodingClient, GeocodingError, NominatimConfig, NominatimGeocodingClient, ZipLookupClient,
    ZipLookupConfig, ZipLookupError, ZippopotamClient,
};

const fn sample_zip_json() -> &'static str {
    r#"{
        "post code": "19103",
        "country": "United States",
        "country abbreviation": "US",
        "places": [{
            "place name": "Philadelphia",
            "longitude": "-75.1741",
            "state": "Pennsylvania",
            "state abbreviation": "PA",
            "latitude": "39.9523"
        }]
    }"#
}

const fn sample_springfield_json() -> &'static str {
    r#"[{
        "place_id": 1,
        "lat": "39.7990175",
        "lon": "-89.6439575",
        "display_name": "Springfield, Sangamon County, Illinois, United States"
    }]"#
}

// ============================================================================
// Zippopotam
// ============================================================================

#[tokio::test]
async fn test_zip_lookup_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/us/19103"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_zip_json()))
        .mount(&server)
        .await;

    let client = ZippopotamClient::new(&ZipLookupConfig::for_testing(server.uri())).unwrap();
    let place = client.lookup("19103").await.unwrap();

    assert_eq!(place.zip, "19103");
    assert_eq!(place.place_name, "Philadelphia");
    assert!((place.location.latitude() - 39.9523).abs() < 1e-9);
    assert!((place.location.longitude() + 75.1741).abs() < 1e-9);
}

#[tokio::test]
async fn test_zip_lookup_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/us/00000"))
        .respond_with(ResponseTemplate::new(404).set_body_string("{}"))
        .mount(&server)
        .await;

    let client = ZippopotamClient::new(&ZipLookupConfig::for_testing(server.uri())).unwrap();
    let err = client.lookup("00000").await.unwrap_err();

    assert!(err.is_unknown_zip());
}

#[tokio::test]
async fn test_zip_lookup_server_error_is_unknown_zip() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = ZippopotamClient::new(&ZipLookupConfig::for_testing(server.uri())).unwrap();
    let err = client.lookup("19103").await.unwrap_err();

    assert!(matches!(err, ZipLookupError::UnknownZip(_)));
}

#[tokio::test]
async fn test_zip_lookup_connection_refused() {
    let client =
        ZippopotamClient::new(&ZipLookupConfig::for_testing("http://127.0.0.1:1")).unwrap();
    let err = client.lookup("19103").await.unwrap_err();

    assert!(!err.is_unknown_zip());
}

// ============================================================================
// Nominatim
// ============================================================================

#[tokio::test]
async fn test_geocode_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Springfield"))
        .and(query_param("format", "json"))
        .and(query_param("limit", "1"))
        .and(query_param("countrycodes", "us"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_springfield_json()))
        .mount(&server)
        .await;

    let client =
        NominatimGeocodingClient::new(&NominatimConfig::for_testing(server.uri())).unwrap();
    let place = client.geocode("Springfield").await.unwrap();

    assert_eq!(place.query, "Springfield");
    assert!(place.display_name.unwrap().contains("Illinois"));
    assert!((place.location.latitude() - 39.799_017_5).abs() < 1e-9);
}

#[tokio::test]
async fn test_geocode_empty_result_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let client =
        NominatimGeocodingClient::new(&NominatimConfig::for_testing(server.uri())).unwrap();
    let err = client.geocode("123 Fake St, Springfield").await.unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_geocode_without_country_filter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Zermatt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"[{"lat": "46.02", "lon": "7.75", "display_name": "Zermatt"}]"#),
        )
        .mount(&server)
        .await;

    let config = NominatimConfig {
        country_filter: String::new(),
        ..NominatimConfig::for_testing(server.uri())
    };
    let client = NominatimGeocodingClient::new(&config).unwrap();
    let place = client.geocode("Zermatt").await.unwrap();

    assert!((place.location.longitude() - 7.75).abs() < 1e-9);
    let requests = server.received_requests().await.unwrap();
    assert!(!requests[0].url.query().unwrap_or_default().contains("countrycodes"));
}

#[tokio::test]
async fn test_geocode_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client =
        NominatimGeocodingClient::new(&NominatimConfig::for_testing(server.uri())).unwrap();
    let err = client.geocode("Springfield").await.unwrap_err();

    assert!(matches!(err, GeocodingError::RequestFailed(_)));
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn test_geocode_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client =
        NominatimGeocodingClient::new(&NominatimConfig::for_testing(server.uri())).unwrap();
    let err = client.geocode("Springfield").await.unwrap_err();

    assert!(matches!(err, GeocodingError::ParseError(_)));
}

#[tokio::test]
async fn test_geocode_cache_avoids_second_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_springfield_json()))
        .expect(1)
        .mount(&server)
        .await;

    let config = NominatimConfig {
        cache_ttl_hours: 1,
        ..NominatimConfig::for_testing(server.uri())
    };
    let client = NominatimGeocodingClient::new(&config).unwrap();

    let first = client.geocode("Springfield").await.unwrap();
    let second = client.geocode("  springfield ").await.unwrap();

    assert_eq!(first.location, second.location);
    server.verify().await;
}
