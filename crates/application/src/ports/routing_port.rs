//! Road routing port
//!
//! Defines the interface for transport-mode-specific route computation.
//! Adapters in the infrastructure layer implement this port on top of a
//! routing engine.

use async_trait::async_trait;
use domain::{RouteComputation, TransportMode, Waypoint};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for road routing
///
/// Implementations must be stateless with respect to calls: concurrent
/// invocations are independent.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoutingPort: Send + Sync {
    /// Compute distance, duration and geometry through `waypoints` in order
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for fewer than 2 waypoints
    /// - `UpstreamError` if the engine answered with a non-success status
    /// - `NoRouteFound` if the engine found no path
    /// - `Timeout` if the engine did not answer in time
    async fn compute_route(
        &self,
        waypoints: &[Waypoint],
        mode: TransportMode,
    ) -> Result<RouteComputation, ApplicationError>;

    /// Check if the routing engine is reachable
    async fn is_available(&self) -> bool;
}
