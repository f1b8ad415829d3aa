//! Route-generation port

use async_trait::async_trait;
use domain::{RoutePlan, Waypoint};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the external optimizer that proposes candidate routes
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoutePlannerPort: Send + Sync {
    /// Generate candidate routes for an origin
    async fn generate_routes(&self, origin: Waypoint) -> Result<RoutePlan, ApplicationError>;

    /// Check if the backend is reachable
    async fn is_available(&self) -> bool;
}
