//! Integration tests for the infrastructure adapters (wiremock-based)
//!
//! Tests cover:
//! - Routing adapter error mapping against a live HTTP server
//! - Batch reconciliation through the routing adapter
//! - Route rendering onto the GeoJSON surface, including the fallback
//! - Route generation through the planner adapter

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{RoutePlannerPort, RoutingPort};
use application::{
    GenerationOutcome, ReconciliationService, RenderKind, RouteGenerationService, RouteVisualizer,
};
use domain::{CandidateRoute, Destination, TransportMode, Waypoint};
use infrastructure::{GeoJsonRenderer, OsrmRoutingAdapter, PlannerAdapter};
use integration_osrm::OsrmConfig;
use integration_planner::PlannerConfig;
use serde_json::json;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn routing_for(server: &MockServer) -> Arc<dyn RoutingPort> {
    let config = OsrmConfig {
        base_url: server.uri(),
        timeout_secs: 5,
        ..OsrmConfig::default()
    };
    Arc::new(OsrmRoutingAdapter::with_config(&config).unwrap())
}

fn tugu() -> Waypoint {
    Waypoint::new(-7.2459, 112.7378).unwrap()
}

fn bungkul() -> Waypoint {
    Waypoint::new(-7.2911, 112.7398).unwrap()
}

fn route(rank: u32, stop: Waypoint, km: f64) -> CandidateRoute {
    CandidateRoute::new(rank, vec![Destination::new(format!("Stop {rank}"), stop)], km).unwrap()
}

fn osrm_body(distance_m: f64, duration_s: f64) -> serde_json::Value {
    json!({
        "code": "Ok",
        "routes": [{
            "distance": distance_m,
            "duration": duration_s,
            "geometry": {
                "type": "LineString",
                "coordinates": [[112.7378, -7.2458], [112.7380, -7.2459]]
            }
        }]
    })
}

// ============================================================================
// Routing adapter
// ============================================================================

mod routing_adapter_tests {
    use super::*;

    #[tokio::test]
    async fn engine_failure_maps_to_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/route/v1/car/.*$"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let err = routing_for(&server)
            .compute_route(&[Waypoint::surabaya(), tugu()], TransportMode::Car)
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::UpstreamError { status_code: 502 }));
    }

    #[tokio::test]
    async fn empty_route_list_maps_to_no_route_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/route/v1/foot/.*$"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"code": "NoRoute", "routes": []})),
            )
            .mount(&server)
            .await;

        let err = routing_for(&server)
            .compute_route(&[Waypoint::surabaya(), tugu()], TransportMode::Walking)
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NoRouteFound));
    }

    #[tokio::test]
    async fn single_waypoint_is_invalid_input() {
        let server = MockServer::start().await;

        let err = routing_for(&server)
            .compute_route(&[Waypoint::surabaya()], TransportMode::Car)
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::InvalidInput(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn availability_follows_nearest_service() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/nearest/v1/car/.*$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": "Ok"})))
            .mount(&server)
            .await;

        assert!(routing_for(&server).is_available().await);
    }

    #[tokio::test]
    async fn availability_checks_the_given_origin() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/nearest/v1/car/112.7398,-7.2911"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": "Ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let config = OsrmConfig {
            base_url: server.uri(),
            timeout_secs: 5,
            ..OsrmConfig::default()
        };
        let routing = OsrmRoutingAdapter::with_config(&config)
            .unwrap()
            .with_health_origin(bungkul());
        assert!(routing.is_available().await);
    }
}

// ============================================================================
// Reconciliation through the adapter
// ============================================================================

mod reconciliation_tests {
    use super::*;

    #[tokio::test]
    async fn batch_is_reconciled_and_reranked() {
        let server = MockServer::start().await;
        // Route ending at Tugu: 8.2 km on the road
        Mock::given(method("GET"))
            .and(path_regex(r"^/route/v1/car/.*;112\.7378,-7\.2459$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(osrm_body(8_200.0, 1_500.0)))
            .mount(&server)
            .await;
        // Route ending at Bungkul: engine down
        Mock::given(method("GET"))
            .and(path_regex(r"^/route/v1/car/.*;112\.7398,-7\.2911$"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let service = ReconciliationService::new(routing_for(&server));
        let routes = vec![route(1, tugu(), 3.0), route(2, bungkul(), 5.0)];

        let reconciled = service.reconcile(routes, Waypoint::surabaya()).await.unwrap();

        assert_eq!(reconciled.len(), 2);
        assert_eq!(reconciled[0].destinations()[0].coordinates, bungkul());
        assert_eq!(reconciled[0].rank(), 1);
        assert!((reconciled[0].total_distance_km() - 5.0).abs() < f64::EPSILON);
        assert!(reconciled[0].estimated_duration_minutes().is_none());

        assert_eq!(reconciled[1].rank(), 2);
        assert!((reconciled[1].total_distance_km() - 8.2).abs() < 1e-9);
        assert_eq!(reconciled[1].estimated_duration_minutes(), Some(25.0));
    }
}

// ============================================================================
// Visualization onto GeoJSON
// ============================================================================

mod visualizer_tests {
    use super::*;

    #[tokio::test]
    async fn two_wheeled_route_is_drawn_solid() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/route/v1/car/.*$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(osrm_body(3_000.0, 600.0)))
            .expect(1)
            .mount(&server)
            .await;

        let mut visualizer = RouteVisualizer::new(routing_for(&server), GeoJsonRenderer::new());
        let view = visualizer
            .show(&route(1, tugu(), 2.0), Waypoint::surabaya(), TransportMode::TwoWheeled)
            .await
            .unwrap();

        assert_eq!(view.kind, RenderKind::Routed);
        assert_eq!(view.distance_km, Some(3.0));
        assert!((view.duration_minutes.unwrap() - 8.0).abs() < 1e-9);

        let geojson = visualizer.renderer().feature_collection();
        let features = geojson["features"].as_array().unwrap();
        assert_eq!(features.len(), 3);
        assert_eq!(features[0]["properties"]["style"], "solid");
        assert_eq!(features[2]["properties"]["label"], "1. Stop 1");
    }

    #[tokio::test]
    async fn unreachable_engine_draws_dashed_straight_line() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/route/v1/.*$"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut visualizer = RouteVisualizer::new(routing_for(&server), GeoJsonRenderer::new());
        let view = visualizer
            .show(&route(1, tugu(), 2.0), Waypoint::surabaya(), TransportMode::Walking)
            .await
            .unwrap();

        assert!(view.is_fallback());
        assert!(view.summary().is_none());

        let renderer = visualizer.into_renderer();
        let (vertices, _) = renderer.path().unwrap();
        assert_eq!(vertices, &[Waypoint::surabaya(), tugu()]);
        let geojson = renderer.feature_collection();
        assert_eq!(geojson["features"][0]["properties"]["style"], "dashed");
    }
}

// ============================================================================
// Generation through the planner adapter
// ============================================================================

mod generation_tests {
    use super::*;

    fn planner_for(server: &MockServer) -> Arc<dyn RoutePlannerPort> {
        let config = PlannerConfig {
            base_url: server.uri(),
            timeout_secs: 5,
        };
        Arc::new(PlannerAdapter::with_config(&config).unwrap())
    }

    #[tokio::test]
    async fn generated_batch_is_committed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate-routes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "ok",
                "data": {
                    "user_location": {"latitude": -7.2458, "longitude": 112.7378},
                    "routes": [
                        {
                            "rank": 1,
                            "total_distance_km": 4.0,
                            "destinations": [
                                {"nama": "Tugu Pahlawan", "order": 1, "coordinates": [-7.2459, 112.7378]}
                            ]
                        },
                        {
                            "rank": 2,
                            "total_distance_km": 2.5,
                            "destinations": [
                                {"nama": "Taman Bungkul", "order": 1, "coordinates": [-7.2911, 112.7398]}
                            ]
                        }
                    ]
                }
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/route/v1/car/.*$"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let service = RouteGenerationService::new(
            planner_for(&server),
            ReconciliationService::new(routing_for(&server)),
        );
        let outcome = service.generate(Waypoint::surabaya()).await.unwrap();

        let GenerationOutcome::Committed(batch) = outcome else {
            panic!("expected a committed batch");
        };
        assert_eq!(batch.routes.len(), 2);
        assert_eq!(batch.best().unwrap().destinations()[0].name, "Taman Bungkul");
        assert_eq!(service.default_selection().unwrap().rank(), 1);
    }

    #[tokio::test]
    async fn rejected_generation_is_an_external_service_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate-routes"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": false, "message": "no destinations"})),
            )
            .mount(&server)
            .await;

        let err = planner_for(&server)
            .generate_routes(Waypoint::surabaya())
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::ExternalService(_)));
    }
}
