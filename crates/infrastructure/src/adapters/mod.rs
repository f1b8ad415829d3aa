//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod planner_adapter;
mod routing_adapter;

pub use planner_adapter::PlannerAdapter;
pub use routing_adapter::OsrmRoutingAdapter;
