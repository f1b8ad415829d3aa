//! Batch distance reconciliation
//!
//! Replaces backend straight-line estimates with road-network figures for a
//! whole batch of candidate routes. Every route is requested concurrently
//! under its own timeout; a slow or failing route degrades to its original
//! distance instead of failing the batch. Once every outcome is in, the
//! batch is stably re-sorted by distance and re-ranked.

use std::sync::Arc;
use std::time::Duration;

use domain::{CandidateRoute, ReconciliationOutcome, TransportMode, Waypoint, rank_by_distance};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, error, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::RoutingPort;

/// Default per-route time budget in seconds
const DEFAULT_PER_ROUTE_TIMEOUT_SECS: u64 = 10;

/// Configuration for batch reconciliation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciliationConfig {
    /// Time budget for each route's routing call
    #[serde(default = "default_per_route_timeout")]
    pub per_route_timeout_secs: u64,
}

const fn default_per_route_timeout() -> u64 {
    DEFAULT_PER_ROUTE_TIMEOUT_SECS
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            per_route_timeout_secs: default_per_route_timeout(),
        }
    }
}

impl ReconciliationConfig {
    /// Per-route timeout as a duration
    #[must_use]
    pub const fn per_route_timeout(&self) -> Duration {
        Duration::from_secs(self.per_route_timeout_secs)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is zero.
    pub fn validate(&self) -> Result<(), String> {
        if self.per_route_timeout_secs == 0 {
            return Err("per_route_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Reconciles candidate-route distances against a routing engine
#[derive(Clone)]
pub struct ReconciliationService {
    routing: Arc<dyn RoutingPort>,
    config: ReconciliationConfig,
}

impl std::fmt::Debug for ReconciliationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReconciliationService")
            .field("routing", &"<RoutingPort>")
            .field("config", &self.config)
            .finish()
    }
}

impl ReconciliationService {
    /// Create a service with the default configuration
    #[must_use]
    pub fn new(routing: Arc<dyn RoutingPort>) -> Self {
        Self {
            routing,
            config: ReconciliationConfig::default(),
        }
    }

    /// Set the reconciliation configuration
    #[must_use]
    pub const fn with_config(mut self, config: ReconciliationConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration
    #[must_use]
    pub const fn config(&self) -> &ReconciliationConfig {
        &self.config
    }

    /// Reconcile a batch and return it sorted ascending by distance with
    /// ranks `1..=N`
    ///
    /// All routing calls are issued before any is awaited, so completion
    /// time tracks the slowest call that did not time out. Routes whose call
    /// fails or times out keep the figures they arrived with.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if any routing call reports a contract
    /// violation. No other per-route failure fails the batch.
    #[instrument(skip(self, routes), fields(routes = routes.len(), origin = %origin))]
    pub async fn reconcile(
        &self,
        mut routes: Vec<CandidateRoute>,
        origin: Waypoint,
    ) -> Result<Vec<CandidateRoute>, ApplicationError> {
        let outcomes = join_all(
            routes
                .iter()
                .map(|route| self.reconcile_one(route, origin)),
        )
        .await;

        for (route, outcome) in routes.iter_mut().zip(outcomes) {
            route.apply_outcome(&outcome?);
        }

        rank_by_distance(&mut routes);

        let reconciled = routes
            .iter()
            .filter(|r| r.reconciliation().is_reconciled())
            .count();
        info!(
            reconciled,
            unreconciled = routes.len() - reconciled,
            "Batch reconciled"
        );
        Ok(routes)
    }

    /// Reconcile a single route without touching it
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` on a contract violation; every other failure
    /// becomes `Unreconciled`.
    pub async fn reconcile_one(
        &self,
        route: &CandidateRoute,
        origin: Waypoint,
    ) -> Result<ReconciliationOutcome, ApplicationError> {
        let waypoints = route.waypoints_from(origin);
        let original_distance_km = route.total_distance_km();
        let rank = route.rank();

        let result = timeout(
            self.config.per_route_timeout(),
            self.routing.compute_route(&waypoints, TransportMode::Car),
        )
        .await;

        match result {
            Ok(Ok(computation)) => {
                let outcome = ReconciliationOutcome::from_computation(&computation);
                debug!(
                    rank,
                    original_km = original_distance_km,
                    road_km = computation.distance_km(),
                    "Route reconciled"
                );
                Ok(outcome)
            },
            Ok(Err(e)) if !e.is_recoverable() => {
                error!(rank, error = %e, "Routing contract violated");
                Err(e)
            },
            Ok(Err(e)) => {
                warn!(rank, error = %e, "Keeping backend distance");
                Ok(ReconciliationOutcome::Unreconciled {
                    original_distance_km,
                })
            },
            Err(_) => {
                warn!(
                    rank,
                    timeout_secs = self.config.per_route_timeout_secs,
                    "Routing call timed out, keeping backend distance"
                );
                Ok(ReconciliationOutcome::Unreconciled {
                    original_distance_km,
                })
            },
        }
    }
}
