//! Road routing integration
//!
//! Provides transport-mode-specific distance, duration and path geometry for
//! an ordered list of waypoints via the [OSRM](https://project-osrm.org)
//! route service.
//!
//! # Architecture
//!
//! The crate follows a client-trait pattern consistent with the other
//! integration crates. [`RoutingClient`] defines the interface, implemented
//! by [`OsrmRoutingClient`]. Errors keep the distinction between an
//! unreachable or failing engine ([`OsrmError::UpstreamError`],
//! [`OsrmError::Timeout`]) and a reachable engine that found no path
//! ([`OsrmError::NoRouteFound`]).
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::{TransportMode, Waypoint};
//! use integration_osrm::{OsrmConfig, OsrmRoutingClient, RoutingClient};
//!
//! let client = OsrmRoutingClient::new(&OsrmConfig::default())?;
//! let route = client
//!     .compute_route(&[Waypoint::surabaya(), Waypoint::surabaya_center()], TransportMode::TwoWheeled)
//!     .await?;
//! println!("{} m in {} s", route.distance_meters, route.duration_seconds);
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{OsrmRoutingClient, RoutingClient};
pub use config::OsrmConfig;
pub use error::OsrmError;
pub use models::{OsrmProfile, format_coordinates, lon_lat_to_waypoint};
