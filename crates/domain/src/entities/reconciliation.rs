//! Per-route reconciliation outcome

use serde::{Deserialize, Serialize};

use super::RouteComputation;

/// Result of upgrading one route to authoritative figures
///
/// `Unreconciled` is a degraded success, not an error: the backend estimate
/// stays in place and no duration is known.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReconciliationOutcome {
    /// Routing engine figures replaced the estimate
    Reconciled {
        /// Road distance in kilometers
        distance_km: f64,
        /// Travel time in minutes
        duration_minutes: f64,
    },
    /// Routing engine unavailable for this route; estimate kept
    Unreconciled {
        /// Backend-estimated distance in kilometers
        original_distance_km: f64,
    },
}

impl ReconciliationOutcome {
    /// Build a reconciled outcome from an engine result
    #[must_use]
    pub fn from_computation(computation: &RouteComputation) -> Self {
        Self::Reconciled {
            distance_km: computation.distance_km(),
            duration_minutes: computation.duration_minutes(),
        }
    }

    /// Whether authoritative figures were obtained
    #[must_use]
    pub const fn is_reconciled(&self) -> bool {
        matches!(self, Self::Reconciled { .. })
    }

    /// Distance the route should be ranked by
    #[must_use]
    pub const fn distance_km(&self) -> f64 {
        match self {
            Self::Reconciled { distance_km, .. } => *distance_km,
            Self::Unreconciled {
                original_distance_km,
            } => *original_distance_km,
        }
    }

    /// Duration, when known
    #[must_use]
    pub const fn duration_minutes(&self) -> Option<f64> {
        match self {
            Self::Reconciled {
                duration_minutes, ..
            } => Some(*duration_minutes),
            Self::Unreconciled { .. } => None,
        }
    }
}
