//! Route generation use case
//!
//! One "generate" action asks the optimizer backend for candidates, reconciles
//! them against the road network and commits the ranked batch as the current
//! one. Actions are tagged with a monotonically increasing generation token;
//! an action that finishes after a newer one has started is reported as
//! superseded and its results are dropped.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use domain::{CandidateRoute, PlanStatistics, Waypoint};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::reconciliation_service::ReconciliationService;
use crate::error::ApplicationError;
use crate::ports::RoutePlannerPort;

/// A reconciled, ranked batch of candidate routes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteBatch {
    /// Generation token the batch was produced under
    pub generation: u64,
    /// Origin every route starts from
    pub origin: Waypoint,
    /// Routes sorted by distance, rank 1 first
    pub routes: Vec<CandidateRoute>,
    /// Optimizer statistics, if reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<PlanStatistics>,
    /// When the batch was committed
    pub generated_at: DateTime<Utc>,
}

impl RouteBatch {
    /// The default selection (rank 1)
    #[must_use]
    pub fn best(&self) -> Option<&CandidateRoute> {
        self.routes.first()
    }

    /// Route with the given rank
    #[must_use]
    pub fn by_rank(&self, rank: u32) -> Option<&CandidateRoute> {
        self.routes.iter().find(|r| r.rank() == rank)
    }
}

/// Result of one generate action
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    /// The batch became the current one
    Committed(RouteBatch),
    /// A newer action started first; nothing was committed
    Superseded {
        /// Token of the stale action
        generation: u64,
        /// Token of the newest action at the time of the check
        latest: u64,
    },
}

impl GenerationOutcome {
    /// The committed batch, if any
    #[must_use]
    pub const fn batch(&self) -> Option<&RouteBatch> {
        match self {
            Self::Committed(batch) => Some(batch),
            Self::Superseded { .. } => None,
        }
    }
}

/// Runs generate actions and owns the current batch
pub struct RouteGenerationService {
    planner: Arc<dyn RoutePlannerPort>,
    reconciler: ReconciliationService,
    generation: AtomicU64,
    current: RwLock<Option<RouteBatch>>,
}

impl std::fmt::Debug for RouteGenerationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteGenerationService")
            .field("planner", &"<RoutePlannerPort>")
            .field("reconciler", &self.reconciler)
            .field("generation", &self.generation)
            .field("has_batch", &self.current.read().is_some())
            .finish()
    }
}

impl RouteGenerationService {
    /// Create a service with no current batch
    #[must_use]
    pub fn new(planner: Arc<dyn RoutePlannerPort>, reconciler: ReconciliationService) -> Self {
        Self {
            planner,
            reconciler,
            generation: AtomicU64::new(0),
            current: RwLock::new(None),
        }
    }

    /// Start a new generation and return its token
    ///
    /// Every earlier token becomes stale.
    pub fn begin_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Token of the newest generation started so far
    #[must_use]
    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// True if no newer generation has started since `token`
    #[must_use]
    pub fn is_current(&self, token: u64) -> bool {
        self.latest_generation() == token
    }

    /// Generate, reconcile and commit a batch for `origin`
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or reconciliation reports a
    /// contract violation. Routing failures for single routes are not
    /// errors.
    #[instrument(skip(self), fields(origin = %origin))]
    pub async fn generate(&self, origin: Waypoint) -> Result<GenerationOutcome, ApplicationError> {
        let token = self.begin_generation();

        let plan = self.planner.generate_routes(origin).await?;
        if !self.is_current(token) {
            return Ok(self.superseded(token));
        }

        let routes = self.reconciler.reconcile(plan.routes, plan.origin).await?;

        let batch = RouteBatch {
            generation: token,
            origin: plan.origin,
            routes,
            statistics: plan.statistics,
            generated_at: Utc::now(),
        };
        Ok(self.commit(batch))
    }

    /// Commit `batch` unless its generation is stale
    pub fn commit(&self, batch: RouteBatch) -> GenerationOutcome {
        let mut current = self.current.write();
        if !self.is_current(batch.generation) {
            drop(current);
            return self.superseded(batch.generation);
        }

        info!(
            generation = batch.generation,
            routes = batch.routes.len(),
            "Route batch committed"
        );
        *current = Some(batch.clone());
        GenerationOutcome::Committed(batch)
    }

    fn superseded(&self, generation: u64) -> GenerationOutcome {
        let latest = self.latest_generation();
        info!(generation, latest, "Discarding results of a superseded generation");
        GenerationOutcome::Superseded { generation, latest }
    }

    /// The current batch, if one has been committed
    #[must_use]
    pub fn current(&self) -> Option<RouteBatch> {
        self.current.read().clone()
    }

    /// The default selection of the current batch (rank 1)
    #[must_use]
    pub fn default_selection(&self) -> Option<CandidateRoute> {
        self.current
            .read()
            .as_ref()
            .and_then(|batch| batch.best().cloned())
    }

    /// Route with `rank` in the current batch
    #[must_use]
    pub fn route_by_rank(&self, rank: u32) -> Option<CandidateRoute> {
        self.current
            .read()
            .as_ref()
            .and_then(|batch| batch.by_rank(rank).cloned())
    }
}
