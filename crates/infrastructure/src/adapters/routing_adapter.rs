//! Routing adapter - Implements RoutingPort using integration_osrm

use application::error::ApplicationError;
use application::ports::RoutingPort;
use async_trait::async_trait;
use domain::{RouteComputation, TransportMode, Waypoint};
use integration_osrm::{OsrmConfig, OsrmError, OsrmRoutingClient, RoutingClient};
use tracing::{debug, instrument};

/// Adapter for road routing through an OSRM server
pub struct OsrmRoutingAdapter {
    client: OsrmRoutingClient,
    base_url: String,
}

impl std::fmt::Debug for OsrmRoutingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OsrmRoutingAdapter")
            .field("client", &"OsrmRoutingClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl OsrmRoutingAdapter {
    /// Create an adapter for the public OSRM demo server
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new() -> Result<Self, ApplicationError> {
        Self::with_config(&OsrmConfig::default())
    }

    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// fails to initialize.
    pub fn with_config(config: &OsrmConfig) -> Result<Self, ApplicationError> {
        let client = OsrmRoutingClient::new(config).map_err(Self::map_error)?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Check reachability at `origin` (usually the configured default origin)
    #[must_use]
    pub fn with_health_origin(mut self, origin: Waypoint) -> Self {
        self.client = self.client.with_health_point(origin);
        self
    }

    /// Map integration routing error to application error
    ///
    /// Keeps the distinction between a failing engine and a reachable engine
    /// without a path.
    fn map_error(err: OsrmError) -> ApplicationError {
        match err {
            OsrmError::InvalidInput(msg) => ApplicationError::InvalidInput(msg),
            OsrmError::UpstreamError { status_code } => {
                ApplicationError::UpstreamError { status_code }
            },
            OsrmError::NoRouteFound => ApplicationError::NoRouteFound,
            OsrmError::Timeout { timeout_secs } => ApplicationError::Timeout { timeout_secs },
            OsrmError::ConnectionFailed(msg) | OsrmError::ParseError(msg) => {
                ApplicationError::ExternalService(format!("routing engine: {msg}"))
            },
            OsrmError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
        }
    }
}

#[async_trait]
impl RoutingPort for OsrmRoutingAdapter {
    #[instrument(skip(self, waypoints), fields(waypoints = waypoints.len(), mode = %mode))]
    async fn compute_route(
        &self,
        waypoints: &[Waypoint],
        mode: TransportMode,
    ) -> Result<RouteComputation, ApplicationError> {
        let route = self
            .client
            .compute_route(waypoints, mode)
            .await
            .map_err(Self::map_error)?;
        debug!(
            distance_m = route.distance_meters,
            duration_s = route.duration_seconds,
            "Route computed"
        );
        Ok(route)
    }

    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}
