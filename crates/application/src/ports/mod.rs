//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod destination_catalog_port;
mod route_planner_port;
mod route_renderer;
mod routing_port;

#[cfg(test)]
pub use destination_catalog_port::MockDestinationCatalogPort;
pub use destination_catalog_port::DestinationCatalogPort;
#[cfg(test)]
pub use route_planner_port::MockRoutePlannerPort;
pub use route_planner_port::RoutePlannerPort;
#[cfg(test)]
pub use route_renderer::MockRouteRenderer;
pub use route_renderer::{MapMarker, MarkerKind, PathStyle, RouteRenderer};
#[cfg(test)]
pub use routing_port::MockRoutingPort;
pub use routing_port::RoutingPort;
