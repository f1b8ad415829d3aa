//! Single-route geometry visualizer
//!
//! Draws one selected route for one transport mode. Every call to
//! [`RouteVisualizer::show`] makes a fresh routing decision, so geometry is
//! never reused across modes. When the routing engine cannot help, the
//! visualizer falls back to a dashed straight-line path through the stops
//! and shows no distance or duration.
//!
//! ```text
//! Idle ──show──▶ Fetching ──ok──▶ Rendered
//!                    │
//!                    └──err──▶ RenderedFallback
//! ```
//!
//! Both rendered states accept another `show` (mode or selection change).

use std::sync::Arc;

use domain::{CandidateRoute, ReconciliationOutcome, TransportMode, Waypoint};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, warn};

use super::route_formatter::{format_distance_km, format_duration_minutes};
use crate::error::ApplicationError;
use crate::ports::{MapMarker, PathStyle, RouteRenderer, RoutingPort};

/// How the displayed path was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderKind {
    /// Road geometry from the routing engine
    Routed,
    /// Straight segments between consecutive waypoints
    StraightLine,
}

/// What the visualizer currently shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteView {
    /// Rank of the displayed route
    pub rank: u32,
    /// Transport mode the view was computed for
    pub mode: TransportMode,
    /// Routed or fallback
    pub kind: RenderKind,
    /// Drawn path, (latitude, longitude) per vertex
    pub geometry: Vec<Waypoint>,
    /// Displayed distance, absent on fallback
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    /// Displayed duration, absent on fallback
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<f64>,
}

impl RouteView {
    /// True if the view is the straight-line fallback
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.kind == RenderKind::StraightLine
    }

    /// Human-readable figures, e.g. `"7.3 km, 25 menit"`
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        match (self.distance_km, self.duration_minutes) {
            (Some(km), Some(minutes)) => Some(format!(
                "{}, {}",
                format_distance_km(km),
                format_duration_minutes(minutes)
            )),
            (Some(km), None) => Some(format_distance_km(km)),
            _ => None,
        }
    }
}

/// Display state machine
#[derive(Debug, Clone, PartialEq, Default)]
pub enum VisualizerState {
    /// Nothing drawn
    #[default]
    Idle,
    /// Waiting for the routing engine
    Fetching {
        /// Rank being fetched
        rank: u32,
        /// Mode being fetched
        mode: TransportMode,
    },
    /// Road geometry drawn
    Rendered(RouteView),
    /// Straight-line fallback drawn
    RenderedFallback(RouteView),
}

impl VisualizerState {
    /// The drawn view, if any
    #[must_use]
    pub const fn view(&self) -> Option<&RouteView> {
        match self {
            Self::Rendered(view) | Self::RenderedFallback(view) => Some(view),
            Self::Idle | Self::Fetching { .. } => None,
        }
    }
}

/// Drives a [`RouteRenderer`] for one selected route at a time
///
/// `show` takes `&mut self`, so fetches for one visualizer are serialized
/// and a late response can never overwrite a newer selection.
pub struct RouteVisualizer<R: RouteRenderer> {
    routing: Arc<dyn RoutingPort>,
    renderer: R,
    state: VisualizerState,
}

impl<R: RouteRenderer + std::fmt::Debug> std::fmt::Debug for RouteVisualizer<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteVisualizer")
            .field("routing", &"<RoutingPort>")
            .field("renderer", &self.renderer)
            .field("state", &self.state)
            .finish()
    }
}

impl<R: RouteRenderer> RouteVisualizer<R> {
    /// Create an idle visualizer
    pub fn new(routing: Arc<dyn RoutingPort>, renderer: R) -> Self {
        Self {
            routing,
            renderer,
            state: VisualizerState::Idle,
        }
    }

    /// Current state
    pub const fn state(&self) -> &VisualizerState {
        &self.state
    }

    /// The drawing surface
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Consume the visualizer and return the drawing surface
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Clear the surface and return to idle
    pub fn reset(&mut self) {
        self.renderer.clear();
        self.state = VisualizerState::Idle;
    }

    /// Draw `route` from `origin` for `mode`
    ///
    /// For `Car`, a route that already carries reconciled figures displays
    /// those figures over freshly fetched geometry. Every other case shows
    /// the figures of the fetch itself. Any recoverable routing failure
    /// draws the straight-line fallback without figures.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the routing port rejects the request; the
    /// surface is cleared and the visualizer returns to idle.
    #[instrument(skip(self, route), fields(rank = route.rank(), mode = %mode))]
    pub async fn show(
        &mut self,
        route: &CandidateRoute,
        origin: Waypoint,
        mode: TransportMode,
    ) -> Result<RouteView, ApplicationError> {
        self.state = VisualizerState::Fetching {
            rank: route.rank(),
            mode,
        };
        self.renderer.clear();
        self.renderer.set_markers(&Self::markers(route, origin));

        let waypoints = route.waypoints_from(origin);
        let carried = Self::carried_over(route, mode);

        match self.routing.compute_route(&waypoints, mode).await {
            Ok(computation) => {
                let (distance_km, duration_minutes) = carried.unwrap_or_else(|| {
                    (computation.distance_km(), computation.duration_minutes())
                });
                debug!(
                    vertices = computation.geometry.len(),
                    carried_over = carried.is_some(),
                    "Route geometry rendered"
                );
                self.renderer.set_path(&computation.geometry, PathStyle::Solid);

                let view = RouteView {
                    rank: route.rank(),
                    mode,
                    kind: RenderKind::Routed,
                    geometry: computation.geometry,
                    distance_km: Some(distance_km),
                    duration_minutes: Some(duration_minutes),
                };
                self.state = VisualizerState::Rendered(view.clone());
                Ok(view)
            },
            Err(e) if !e.is_recoverable() => {
                error!(error = %e, "Routing contract violated");
                self.reset();
                Err(e)
            },
            Err(e) => {
                warn!(error = %e, "Routing unavailable, drawing straight line");
                self.renderer.set_path(&waypoints, PathStyle::Dashed);

                let view = RouteView {
                    rank: route.rank(),
                    mode,
                    kind: RenderKind::StraightLine,
                    geometry: waypoints,
                    distance_km: None,
                    duration_minutes: None,
                };
                self.state = VisualizerState::RenderedFallback(view.clone());
                Ok(view)
            },
        }
    }

    /// Reconciled car figures worth carrying over, if any
    fn carried_over(route: &CandidateRoute, mode: TransportMode) -> Option<(f64, f64)> {
        if mode != TransportMode::Car {
            return None;
        }
        match route.reconciliation() {
            ReconciliationOutcome::Reconciled {
                distance_km,
                duration_minutes,
            } => Some((distance_km, duration_minutes)),
            ReconciliationOutcome::Unreconciled { .. } => None,
        }
    }

    fn markers(route: &CandidateRoute, origin: Waypoint) -> Vec<MapMarker> {
        std::iter::once(MapMarker::origin(origin))
            .chain(route.destinations().iter().zip(1u32..).map(|(dest, index)| {
                let order = if dest.order == 0 { index } else { dest.order };
                MapMarker::stop(dest.coordinates, order, &dest.name)
            }))
            .collect()
    }
}
