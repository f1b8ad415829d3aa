//! Planner adapter - Implements RoutePlannerPort using integration_planner

use application::error::ApplicationError;
use application::ports::RoutePlannerPort;
use async_trait::async_trait;
use domain::{RoutePlan, Waypoint};
use integration_planner::{HttpPlannerClient, PlannerClient, PlannerConfig, PlannerError};
use tracing::{debug, instrument};

/// Adapter for the route-generation backend
#[derive(Debug)]
pub struct PlannerAdapter {
    client: HttpPlannerClient,
}

impl PlannerAdapter {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// fails to initialize.
    pub fn with_config(config: &PlannerConfig) -> Result<Self, ApplicationError> {
        let client = HttpPlannerClient::new(config).map_err(Self::map_error)?;
        Ok(Self { client })
    }

    /// Map integration planner error to application error
    fn map_error(err: PlannerError) -> ApplicationError {
        match err {
            PlannerError::UpstreamError { status_code } => {
                ApplicationError::UpstreamError { status_code }
            },
            PlannerError::Timeout { timeout_secs } => ApplicationError::Timeout { timeout_secs },
            PlannerError::Rejected(msg) => {
                ApplicationError::ExternalService(format!("route generation rejected: {msg}"))
            },
            PlannerError::ConnectionFailed(msg) | PlannerError::ParseError(msg) => {
                ApplicationError::ExternalService(format!("route generation backend: {msg}"))
            },
            PlannerError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
        }
    }
}

#[async_trait]
impl RoutePlannerPort for PlannerAdapter {
    #[instrument(skip(self), fields(origin = %origin))]
    async fn generate_routes(&self, origin: Waypoint) -> Result<RoutePlan, ApplicationError> {
        let plan = self
            .client
            .generate_routes(origin)
            .await
            .map_err(Self::map_error)?;
        debug!(routes = plan.routes.len(), "Candidate routes received");
        Ok(plan)
    }

    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}
