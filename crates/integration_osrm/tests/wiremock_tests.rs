//! Integration tests for the OSRM client (wiremock-based)

use domain::{TransportMode, Waypoint};
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use integration_osrm::{OsrmConfig, OsrmError, OsrmRoutingClient, RoutingClient};

fn config_for_mock(base_url: &str) -> OsrmConfig {
    OsrmConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
        ..OsrmConfig::default()
    }
}

fn waypoints() -> Vec<Waypoint> {
    vec![
        Waypoint::surabaya(),
        Waypoint::new(-7.2459, 112.7378).unwrap(),
        Waypoint::new(-7.2655, 112.7500).unwrap(),
    ]
}

const fn sample_route_json() -> &'static str {
    r#"{
        "code": "Ok",
        "routes": [{
            "distance": 7340.2,
            "duration": 1200.0,
            "weight": 1250.3,
            "geometry": {
                "type": "LineString",
                "coordinates": [
                    [112.7378, -7.2458],
                    [112.7390, -7.2500],
                    [112.7500, -7.2655]
                ]
            },
            "legs": []
        }],
        "waypoints": []
    }"#
}

#[tokio::test]
async fn test_compute_route_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/route/v1/car/112.7378,-7.2458;112.7378,-7.2459;112.75,-7.2655",
        ))
        .and(query_param("overview", "full"))
        .and(query_param("geometries", "geojson"))
        .and(query_param("steps", "true"))
        .and(query_param("annotations", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_route_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = OsrmRoutingClient::new(&config_for_mock(&server.uri())).unwrap();
    let route = client
        .compute_route(&waypoints(), TransportMode::Car)
        .await
        .unwrap();

    assert!((route.distance_meters - 7340.2).abs() < f64::EPSILON);
    assert!((route.duration_seconds - 1200.0).abs() < f64::EPSILON);
    assert_eq!(route.geometry.len(), 3);
}

#[tokio::test]
async fn test_geometry_is_converted_to_lat_lon() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/car/.*$"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_route_json()))
        .mount(&server)
        .await;

    let client = OsrmRoutingClient::new(&config_for_mock(&server.uri())).unwrap();
    let route = client
        .compute_route(&waypoints(), TransportMode::Car)
        .await
        .unwrap();

    let first = route.geometry[0];
    assert!((first.latitude() - -7.2458).abs() < f64::EPSILON);
    assert!((first.longitude() - 112.7378).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_two_wheeled_uses_car_profile_with_scaled_duration() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/car/.*$"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_route_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = OsrmRoutingClient::new(&config_for_mock(&server.uri())).unwrap();
    let route = client
        .compute_route(&waypoints(), TransportMode::TwoWheeled)
        .await
        .unwrap();

    assert!((route.distance_meters - 7340.2).abs() < f64::EPSILON);
    assert!((route.duration_seconds - 960.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_walking_uses_foot_profile() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/foot/.*$"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_route_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = OsrmRoutingClient::new(&config_for_mock(&server.uri())).unwrap();
    let route = client
        .compute_route(&waypoints(), TransportMode::Walking)
        .await
        .unwrap();

    assert!((route.duration_seconds - 1200.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_server_error_is_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/.*$"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = OsrmRoutingClient::new(&config_for_mock(&server.uri())).unwrap();
    let result = client.compute_route(&waypoints(), TransportMode::Car).await;

    match result {
        Err(OsrmError::UpstreamError { status_code }) => assert_eq!(status_code, 503),
        other => panic!("expected UpstreamError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_bad_request_is_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/.*$"))
        .respond_with(ResponseTemplate::new(400).set_body_string(
            r#"{ "code": "InvalidQuery", "message": "Query string malformed" }"#,
        ))
        .mount(&server)
        .await;

    let client = OsrmRoutingClient::new(&config_for_mock(&server.uri())).unwrap();
    let result = client.compute_route(&waypoints(), TransportMode::Car).await;

    assert!(matches!(
        result,
        Err(OsrmError::UpstreamError { status_code: 400 })
    ));
}

#[tokio::test]
async fn test_empty_routes_is_no_route_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/.*$"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{ "code": "NoRoute", "routes": [] }"#),
        )
        .mount(&server)
        .await;

    let client = OsrmRoutingClient::new(&config_for_mock(&server.uri())).unwrap();
    let result = client.compute_route(&waypoints(), TransportMode::Car).await;

    assert!(matches!(result, Err(OsrmError::NoRouteFound)));
}

#[tokio::test]
async fn test_fewer_than_two_waypoints_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_route_json()))
        .expect(0)
        .mount(&server)
        .await;

    let client = OsrmRoutingClient::new(&config_for_mock(&server.uri())).unwrap();

    let result = client.compute_route(&[], TransportMode::Car).await;
    assert!(matches!(result, Err(OsrmError::InvalidInput(_))));

    let result = client
        .compute_route(&[Waypoint::surabaya()], TransportMode::Car)
        .await;
    assert!(matches!(result, Err(OsrmError::InvalidInput(_))));
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/.*$"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = OsrmRoutingClient::new(&config_for_mock(&server.uri())).unwrap();
    let result = client.compute_route(&waypoints(), TransportMode::Car).await;

    assert!(matches!(result, Err(OsrmError::ParseError(_))));
}

#[tokio::test]
async fn test_unreachable_server_is_connection_failed() {
    let client = OsrmRoutingClient::new(&config_for_mock("http://127.0.0.1:1")).unwrap();
    let result = client.compute_route(&waypoints(), TransportMode::Car).await;

    assert!(matches!(result, Err(OsrmError::ConnectionFailed(_))));
}

#[tokio::test]
async fn test_health_check() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/nearest/v1/car/.*$"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{ "code": "Ok" }"#))
        .mount(&server)
        .await;

    let client = OsrmRoutingClient::new(&config_for_mock(&server.uri())).unwrap();
    assert!(client.is_healthy().await);

    let down = OsrmRoutingClient::new(&config_for_mock("http://127.0.0.1:1")).unwrap();
    assert!(!down.is_healthy().await);
}

#[tokio::test]
async fn test_health_check_snaps_configured_point() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearest/v1/car/112.7398,-7.2911"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{ "code": "Ok" }"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = OsrmRoutingClient::new(&config_for_mock(&server.uri()))
        .unwrap()
        .with_health_point(Waypoint::new(-7.2911, 112.7398).unwrap());
    assert!(client.is_healthy().await);
}
