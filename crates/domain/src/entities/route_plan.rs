//! A batch of candidate routes produced by one generation request

use serde::{Deserialize, Serialize};

use super::CandidateRoute;
use crate::value_objects::Waypoint;

/// Optimizer run statistics reported alongside a batch
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanStatistics {
    /// Generations the optimizer ran
    pub total_generations: u32,
    /// Best straight-line distance found, in kilometers
    pub best_distance_km: f64,
    /// Fitness of the initial population's best member
    pub initial_fitness: f64,
    /// Fitness of the final best member
    pub final_fitness: f64,
    /// Relative improvement between initial and final fitness
    pub improvement_percentage: f64,
}

/// Candidate routes for one origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    /// Origin the routes were generated for
    pub origin: Waypoint,
    /// Candidates in backend order
    pub routes: Vec<CandidateRoute>,
    /// Optimizer statistics, if the backend reported them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<PlanStatistics>,
}

impl RoutePlan {
    /// Create a plan without statistics
    #[must_use]
    pub const fn new(origin: Waypoint, routes: Vec<CandidateRoute>) -> Self {
        Self {
            origin,
            routes,
            statistics: None,
        }
    }

    /// Attach optimizer statistics
    #[must_use]
    pub const fn with_statistics(mut self, statistics: PlanStatistics) -> Self {
        self.statistics = Some(statistics);
        self
    }

    /// True if the backend produced no candidates
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
