//! Integration tests for the route-generation client (wiremock-based)

use domain::Waypoint;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use integration_planner::{HttpPlannerClient, PlannerClient, PlannerConfig, PlannerError};

fn config_for_mock(base_url: &str) -> PlannerConfig {
    PlannerConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
    }
}

const fn sample_response_json() -> &'static str {
    r#"{
        "success": true,
        "message": "Routes generated successfully",
        "data": {
            "user_location": { "latitude": -7.2458, "longitude": 112.7378 },
            "hga_config": { "population_size": 50, "generations": 100, "crossover_rate": 0.8, "mutation_rate": 0.1 },
            "statistics": {
                "total_generations": 100,
                "best_distance_km": 6.4,
                "initial_fitness": 0.11,
                "final_fitness": 0.16,
                "improvement_percentage": 45.5
            },
            "routes": [
                {
                    "rank": 1,
                    "start_point": [-7.2458, 112.7378],
                    "total_destinations": 2,
                    "total_distance_km": 6.4,
                    "is_valid_order": true,
                    "fitness": 0.16,
                    "destinations": [
                        {
                            "place_id": "ChIJ-rawon",
                            "order": 1,
                            "nama": "Rawon Setan",
                            "kategori": ["makanan_berat"],
                            "coordinates": [-7.2601, 112.7402],
                            "rating": 4.5
                        },
                        {
                            "place_id": null,
                            "order": 2,
                            "nama": "Tugu Pahlawan",
                            "kategori": ["non_kuliner"],
                            "coordinates": [-7.2459, 112.7378]
                        }
                    ]
                },
                {
                    "rank": 2,
                    "start_point": [-7.2458, 112.7378],
                    "total_destinations": 1,
                    "total_distance_km": 8.9,
                    "is_valid_order": false,
                    "fitness": 0.11,
                    "destinations": [
                        {
                            "order": 1,
                            "nama": "Pakuwon Mall",
                            "kategori": ["mall"],
                            "coordinates": [-7.2893, 112.6764]
                        }
                    ]
                }
            ]
        },
        "timestamp": "2026-10-18T09:00:00.000000"
    }"#
}

#[tokio::test]
async fn test_generate_routes_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate-routes"))
        .and(body_json(serde_json::json!({ "latitude": -7.2458, "longitude": 112.7378 })))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_response_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpPlannerClient::new(&config_for_mock(&server.uri())).unwrap();
    let plan = client.generate_routes(Waypoint::surabaya()).await.unwrap();

    assert_eq!(plan.routes.len(), 2);
    let first = &plan.routes[0];
    assert_eq!(first.rank(), 1);
    assert_eq!(first.total_destinations(), 2);
    assert!((first.total_distance_km() - 6.4).abs() < f64::EPSILON);
    assert!(first.estimated_duration_minutes().is_none());
    assert_eq!(first.destinations()[0].name, "Rawon Setan");
    assert!((first.destinations()[0].coordinates.latitude() - -7.2601).abs() < f64::EPSILON);
    assert!(!plan.routes[1].is_valid_order());

    let stats = plan.statistics.unwrap();
    assert_eq!(stats.total_generations, 100);
}

#[tokio::test]
async fn test_server_error_is_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate-routes"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let client = HttpPlannerClient::new(&config_for_mock(&server.uri())).unwrap();
    let result = client.generate_routes(Waypoint::surabaya()).await;

    assert!(matches!(
        result,
        Err(PlannerError::UpstreamError { status_code: 500 })
    ));
}

#[tokio::test]
async fn test_unsuccessful_envelope_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate-routes"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{ "success": false, "message": "Lokasi di luar jangkauan", "data": null, "timestamp": "x" }"#,
        ))
        .mount(&server)
        .await;

    let client = HttpPlannerClient::new(&config_for_mock(&server.uri())).unwrap();
    let result = client.generate_routes(Waypoint::surabaya()).await;

    assert!(matches!(result, Err(PlannerError::Rejected(_))));
}

#[tokio::test]
async fn test_unreachable_backend_is_connection_failed() {
    let client = HttpPlannerClient::new(&config_for_mock("http://127.0.0.1:1")).unwrap();
    let result = client.generate_routes(Waypoint::surabaya()).await;

    assert!(matches!(result, Err(PlannerError::ConnectionFailed(_))));
    assert!(!client.is_healthy().await);
}
