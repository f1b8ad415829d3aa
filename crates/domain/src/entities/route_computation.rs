//! Authoritative route figures returned by a road-routing engine

use serde::{Deserialize, Serialize};

use crate::value_objects::Waypoint;

/// Distance, duration and drawable path for one ordered waypoint list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteComputation {
    /// Total distance in meters
    pub distance_meters: f64,
    /// Total travel time in seconds
    pub duration_seconds: f64,
    /// Physical path, (latitude, longitude) per vertex
    pub geometry: Vec<Waypoint>,
}

impl RouteComputation {
    /// Create a new computation result
    #[must_use]
    pub const fn new(distance_meters: f64, duration_seconds: f64, geometry: Vec<Waypoint>) -> Self {
        Self {
            distance_meters,
            duration_seconds,
            geometry,
        }
    }

    /// Distance in kilometers
    #[must_use]
    pub fn distance_km(&self) -> f64 {
        self.distance_meters / 1000.0
    }

    /// Duration in minutes
    #[must_use]
    pub fn duration_minutes(&self) -> f64 {
        self.duration_seconds / 60.0
    }

    /// Scale the duration, leaving distance and geometry untouched
    #[must_use]
    pub fn with_duration_factor(mut self, factor: f64) -> Self {
        self.duration_seconds *= factor;
        self
    }
}
