//! Application state shared across handlers

use std::sync::Arc;

use application::ports::{DestinationCatalogPort, RoutePlannerPort, RoutingPort};
use application::{ApplicationError, HealthService, ReconciliationService, RouteGenerationService};
use domain::Waypoint;
use infrastructure::{AppConfig, JsonlDestinationCatalog, OsrmRoutingAdapter, PlannerAdapter};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Road routing, used directly for per-request visualizers
    pub routing: Arc<dyn RoutingPort>,
    /// Batch reconciliation for caller-supplied routes
    pub reconciler: ReconciliationService,
    /// Generate actions and the current batch
    pub generation: Arc<RouteGenerationService>,
    /// Destination catalog
    pub catalog: Arc<dyn DestinationCatalogPort>,
    /// Upstream health
    pub health: Arc<HealthService>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("routing", &"<RoutingPort>")
            .field("reconciler", &self.reconciler)
            .field("generation", &self.generation)
            .field("catalog", &"<DestinationCatalogPort>")
            .field("health", &self.health)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Wire adapters and services from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be built from its section.
    pub fn from_config(config: AppConfig) -> Result<Self, ApplicationError> {
        let health_origin = config
            .default_origin
            .waypoint()
            .unwrap_or_else(|_| Waypoint::surabaya());
        let routing: Arc<dyn RoutingPort> = Arc::new(
            OsrmRoutingAdapter::with_config(&config.routing)?.with_health_origin(health_origin),
        );
        let planner: Arc<dyn RoutePlannerPort> =
            Arc::new(PlannerAdapter::with_config(&config.planner)?);
        let catalog: Arc<dyn DestinationCatalogPort> =
            Arc::new(JsonlDestinationCatalog::new(&config.catalog));

        let reconciler = ReconciliationService::new(Arc::clone(&routing))
            .with_config(config.reconciliation.clone());
        let generation = RouteGenerationService::new(Arc::clone(&planner), reconciler.clone());
        let health = HealthService::new(Arc::clone(&routing))
            .with_planner(planner)
            .with_config(config.health.clone());

        Ok(Self {
            routing,
            reconciler,
            generation: Arc::new(generation),
            catalog,
            health: Arc::new(health),
            config: Arc::new(config),
        })
    }

    /// Origin used when a request does not carry one
    ///
    /// Falls back to Surabaya if the configured origin is out of range.
    #[must_use]
    pub fn default_origin(&self) -> Waypoint {
        self.config
            .default_origin
            .waypoint()
            .unwrap_or_else(|_| Waypoint::surabaya())
    }
}
