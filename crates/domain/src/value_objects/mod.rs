//! Value Objects - Immutable, identity-less domain primitives

mod transport_mode;
mod waypoint;

pub use transport_mode::TransportMode;
pub use waypoint::{InvalidCoordinates, Waypoint};
