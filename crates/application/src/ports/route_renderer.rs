//! Drawing-surface port driven by the route visualizer

use std::fmt;

use domain::Waypoint;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

/// What a marker stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    /// The user's starting point
    Origin,
    /// A destination on the route
    Stop,
}

/// A labeled point on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    /// Marker position
    pub position: Waypoint,
    /// Marker kind
    pub kind: MarkerKind,
    /// Label shown with the marker (e.g. "1. Tugu Pahlawan")
    pub label: String,
}

impl MapMarker {
    /// Marker for the starting point
    #[must_use]
    pub fn origin(position: Waypoint) -> Self {
        Self {
            position,
            kind: MarkerKind::Origin,
            label: "Lokasi Anda".to_string(),
        }
    }

    /// Marker for a numbered stop
    #[must_use]
    pub fn stop(position: Waypoint, order: u32, name: &str) -> Self {
        Self {
            position,
            kind: MarkerKind::Stop,
            label: format!("{order}. {name}"),
        }
    }
}

/// How a path is stroked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathStyle {
    /// Road geometry from the routing engine
    Solid,
    /// Straight-line fallback
    Dashed,
}

impl fmt::Display for PathStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solid => write!(f, "solid"),
            Self::Dashed => write!(f, "dashed"),
        }
    }
}

/// A single mutable drawing surface
///
/// Owned exclusively by one visualizer; calls are synchronous.
#[cfg_attr(test, automock)]
pub trait RouteRenderer: Send {
    /// Replace all markers
    fn set_markers(&mut self, markers: &[MapMarker]);

    /// Replace the drawn path
    fn set_path(&mut self, path: &[Waypoint], style: PathStyle);

    /// Remove markers and path
    fn clear(&mut self);
}
