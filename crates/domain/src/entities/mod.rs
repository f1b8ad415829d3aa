//! Domain entities - Objects with identity and lifecycle

mod candidate_route;
mod destination;
mod destination_record;
mod reconciliation;
mod route_computation;
mod route_plan;

pub use candidate_route::{CandidateRoute, rank_by_distance};
pub use destination::Destination;
pub use destination_record::{
    DEFAULT_ADDRESS, DEFAULT_CATEGORY, DEFAULT_NAME, DEFAULT_OPENING_HOURS, RawDestinationRecord,
};
pub use reconciliation::ReconciliationOutcome;
pub use route_computation::RouteComputation;
pub use route_plan::{PlanStatistics, RoutePlan};
