//! Candidate route entity

use serde::{Deserialize, Serialize};

use super::{Destination, ReconciliationOutcome};
use crate::errors::DomainError;
use crate::value_objects::Waypoint;

/// A multi-stop route proposed by the route-generation backend
///
/// The destination order is the visiting order and is never changed after
/// construction; only the distance, duration and rank are mutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRoute {
    rank: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start_point: Option<Waypoint>,
    destinations: Vec<Destination>,
    total_distance_km: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    estimated_duration_minutes: Option<f64>,
    #[serde(default = "default_valid_order")]
    is_valid_order: bool,
    #[serde(default)]
    fitness: f64,
}

const fn default_valid_order() -> bool {
    true
}

impl CandidateRoute {
    /// Create a new candidate route
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if there are no destinations or the
    /// distance is negative or not finite.
    pub fn new(
        rank: u32,
        destinations: Vec<Destination>,
        total_distance_km: f64,
    ) -> Result<Self, DomainError> {
        if destinations.is_empty() {
            return Err(DomainError::ValidationError(
                "route must contain at least one destination".to_string(),
            ));
        }
        if !total_distance_km.is_finite() || total_distance_km < 0.0 {
            return Err(DomainError::ValidationError(format!(
                "route distance must be a non-negative number, got {total_distance_km}"
            )));
        }

        Ok(Self {
            rank,
            start_point: None,
            destinations,
            total_distance_km,
            estimated_duration_minutes: None,
            is_valid_order: true,
            fitness: 0.0,
        })
    }

    /// Set the backend-reported start point
    #[must_use]
    pub const fn with_start_point(mut self, start_point: Waypoint) -> Self {
        self.start_point = Some(start_point);
        self
    }

    /// Set the backend fitness score
    #[must_use]
    pub const fn with_fitness(mut self, fitness: f64) -> Self {
        self.fitness = fitness;
        self
    }

    /// Set whether the backend considers the visiting order valid
    #[must_use]
    pub const fn with_valid_order(mut self, is_valid_order: bool) -> Self {
        self.is_valid_order = is_valid_order;
        self
    }

    /// Set a known duration (e.g. carried over from an earlier reconciliation)
    #[must_use]
    pub const fn with_duration_minutes(mut self, minutes: f64) -> Self {
        self.estimated_duration_minutes = Some(minutes);
        self
    }

    /// 1-based rank
    #[must_use]
    pub const fn rank(&self) -> u32 {
        self.rank
    }

    /// Start point reported by the backend
    #[must_use]
    pub const fn start_point(&self) -> Option<Waypoint> {
        self.start_point
    }

    /// Stops in visiting order
    #[must_use]
    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    /// Number of stops
    #[must_use]
    pub fn total_destinations(&self) -> usize {
        self.destinations.len()
    }

    /// Current distance in kilometers (authoritative if reconciled)
    #[must_use]
    pub const fn total_distance_km(&self) -> f64 {
        self.total_distance_km
    }

    /// Reconciled duration in minutes, if known
    #[must_use]
    pub const fn estimated_duration_minutes(&self) -> Option<f64> {
        self.estimated_duration_minutes
    }

    /// Backend validity flag for the visiting order
    #[must_use]
    pub const fn is_valid_order(&self) -> bool {
        self.is_valid_order
    }

    /// Backend fitness score
    #[must_use]
    pub const fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Overwrite the rank
    pub const fn set_rank(&mut self, rank: u32) {
        self.rank = rank;
    }

    /// Routing input: the origin followed by every stop in visiting order
    #[must_use]
    pub fn waypoints_from(&self, origin: Waypoint) -> Vec<Waypoint> {
        std::iter::once(origin)
            .chain(self.destinations.iter().map(|d| d.coordinates))
            .collect()
    }

    /// Merge a reconciliation outcome into the route
    ///
    /// `Reconciled` replaces distance and duration. `Unreconciled` leaves the
    /// route untouched, so figures from an earlier reconciliation survive a
    /// failed retry.
    pub const fn apply_outcome(&mut self, outcome: &ReconciliationOutcome) {
        if let ReconciliationOutcome::Reconciled {
            distance_km,
            duration_minutes,
        } = *outcome
        {
            self.total_distance_km = distance_km;
            self.estimated_duration_minutes = Some(duration_minutes);
        }
    }

    /// The route's current reconciliation state
    #[must_use]
    pub const fn reconciliation(&self) -> ReconciliationOutcome {
        match self.estimated_duration_minutes {
            Some(duration_minutes) => ReconciliationOutcome::Reconciled {
                distance_km: self.total_distance_km,
                duration_minutes,
            },
            None => ReconciliationOutcome::Unreconciled {
                original_distance_km: self.total_distance_km,
            },
        }
    }
}

/// Sort routes ascending by distance and reassign ranks `1..=N`
///
/// The sort is stable, so routes with equal distance keep their relative
/// order. NaN distances sort last.
pub fn rank_by_distance(routes: &mut [CandidateRoute]) {
    routes.sort_by(|a, b| a.total_distance_km.total_cmp(&b.total_distance_km));
    for (index, route) in routes.iter_mut().enumerate() {
        route.rank = u32::try_from(index + 1).unwrap_or(u32::MAX);
    }
}
