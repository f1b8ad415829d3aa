//! OSRM route-service client
//!
//! Issues `GET {base}/route/v1/{profile}/{lon,lat;...}` with full GeoJSON
//! overview geometry and converts the first returned route to a
//! [`RouteComputation`].

use std::time::Duration;

use async_trait::async_trait;
use domain::{RouteComputation, TransportMode, Waypoint};
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::config::OsrmConfig;
use crate::error::OsrmError;
use crate::models::{OsrmProfile, RawRoute, RawRouteResponse, format_coordinates, lon_lat_to_waypoint};

/// Trait for road-routing clients
#[async_trait]
pub trait RoutingClient: Send + Sync {
    /// Compute distance, duration and geometry for an ordered waypoint list
    ///
    /// Waypoints are visited in the given order; at least two are required.
    async fn compute_route(
        &self,
        waypoints: &[Waypoint],
        mode: TransportMode,
    ) -> Result<RouteComputation, OsrmError>;

    /// Check if the routing engine is reachable
    async fn is_healthy(&self) -> bool;
}

/// Client for an OSRM HTTP server
///
/// Stateless apart from the pooled HTTP connection; concurrent calls are
/// independent.
#[derive(Debug)]
pub struct OsrmRoutingClient {
    client: Client,
    config: OsrmConfig,
    health_point: Waypoint,
}

impl OsrmRoutingClient {
    /// Create a new OSRM client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &OsrmConfig) -> Result<Self, OsrmError> {
        config.validate().map_err(OsrmError::ConfigurationError)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| OsrmError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
            health_point: Waypoint::surabaya(),
        })
    }

    /// Snap this point in health checks instead of Surabaya
    #[must_use]
    pub fn with_health_point(mut self, health_point: Waypoint) -> Self {
        self.health_point = health_point;
        self
    }

    /// Build the route-service URL for a profile and waypoint list
    fn route_url(&self, profile: OsrmProfile, waypoints: &[Waypoint]) -> String {
        format!(
            "{}/route/v1/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            profile,
            format_coordinates(waypoints)
        )
    }

    /// Map a transport failure to a typed error
    fn map_send_error(&self, e: &reqwest::Error) -> OsrmError {
        if e.is_timeout() {
            OsrmError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }
        } else {
            OsrmError::ConnectionFailed(e.to_string())
        }
    }

    /// Parse the raw route-service body and take the first route
    fn parse_route_response(body: &str) -> Result<RouteComputation, OsrmError> {
        let raw: RawRouteResponse =
            serde_json::from_str(body).map_err(|e| OsrmError::ParseError(e.to_string()))?;

        let Some(route) = raw.routes.into_iter().next() else {
            debug!(code = ?raw.code, "Routing engine returned no routes");
            return Err(OsrmError::NoRouteFound);
        };

        Self::convert_route(route)
    }

    /// Convert a raw route, flipping every vertex to (latitude, longitude)
    fn convert_route(raw: RawRoute) -> Result<RouteComputation, OsrmError> {
        let geometry = raw
            .geometry
            .coordinates
            .into_iter()
            .map(|pair| {
                lon_lat_to_waypoint(pair).map_err(|e| {
                    OsrmError::ParseError(format!("geometry vertex {pair:?}: {e}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RouteComputation::new(raw.distance, raw.duration, geometry))
    }
}

#[async_trait]
impl RoutingClient for OsrmRoutingClient {
    #[instrument(skip(self, waypoints), fields(waypoints = waypoints.len(), mode = %mode))]
    async fn compute_route(
        &self,
        waypoints: &[Waypoint],
        mode: TransportMode,
    ) -> Result<RouteComputation, OsrmError> {
        if waypoints.len() < 2 {
            return Err(OsrmError::InvalidInput(format!(
                "at least 2 waypoints are required, got {}",
                waypoints.len()
            )));
        }

        let profile = OsrmProfile::for_mode(mode);
        let url = self.route_url(profile, waypoints);

        let params = [
            ("overview", "full"),
            ("geometries", "geojson"),
            ("steps", "true"),
            ("annotations", "true"),
        ];

        debug!(%url, %profile, "Requesting route");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Routing engine request failed");
            return Err(OsrmError::UpstreamError {
                status_code: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| OsrmError::ParseError(e.to_string()))?;

        let computation = Self::parse_route_response(&body)?;

        let computation = match mode {
            TransportMode::TwoWheeled => {
                computation.with_duration_factor(self.config.two_wheeled_duration_factor)
            },
            TransportMode::Car | TransportMode::Walking => computation,
        };

        debug!(
            distance_m = computation.distance_meters,
            duration_s = computation.duration_seconds,
            vertices = computation.geometry.len(),
            "Route computed"
        );
        Ok(computation)
    }

    async fn is_healthy(&self) -> bool {
        let url = format!(
            "{}/nearest/v1/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            OsrmProfile::Car,
            format_coordinates(&[self.health_point])
        );

        match self.client.get(&url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                warn!(error = %e, "Routing engine health check failed");
                false
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = OsrmRoutingClient::new(&OsrmConfig::for_testing());
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_rejects_invalid_config() {
        let config = OsrmConfig {
            timeout_secs: 0,
            ..OsrmConfig::default()
        };
        assert!(matches!(
            OsrmRoutingClient::new(&config),
            Err(OsrmError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_route_url() {
        let config = OsrmConfig {
            base_url: "http://osrm.local/".to_string(),
            ..OsrmConfig::for_testing()
        };
        let client = OsrmRoutingClient::new(&config).unwrap();
        let url = client.route_url(
            OsrmProfile::Foot,
            &[Waypoint::surabaya(), Waypoint::surabaya_center()],
        );
        assert_eq!(
            url,
            "http://osrm.local/route/v1/foot/112.7378,-7.2458;112.7521,-7.2575"
        );
    }

    #[test]
    fn test_parse_route_response() {
        let body = r#"{
            "code": "Ok",
            "routes": [{
                "distance": 5230.4,
                "duration": 812.0,
                "geometry": { "type": "LineString", "coordinates": [[112.7378, -7.2458], [112.75, -7.26]] }
            }]
        }"#;
        let computation = OsrmRoutingClient::parse_route_response(body).unwrap();
        assert!((computation.distance_meters - 5230.4).abs() < f64::EPSILON);
        assert_eq!(computation.geometry.len(), 2);
        assert!((computation.geometry[0].latitude() - -7.2458).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_empty_routes() {
        let body = r#"{ "code": "NoRoute", "routes": [] }"#;
        assert!(matches!(
            OsrmRoutingClient::parse_route_response(body),
            Err(OsrmError::NoRouteFound)
        ));
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(
            OsrmRoutingClient::parse_route_response("not json"),
            Err(OsrmError::ParseError(_))
        ));
    }

    #[tokio::test]
    async fn test_single_waypoint_is_invalid_input() {
        let client = OsrmRoutingClient::new(&OsrmConfig::for_testing()).unwrap();
        let result = client
            .compute_route(&[Waypoint::surabaya()], TransportMode::Car)
            .await;
        assert!(matches!(result, Err(OsrmError::InvalidInput(_))));
    }
}
