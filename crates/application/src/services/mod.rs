//! Application services - Use case implementations

mod health_service;
mod reconciliation_service;
mod route_formatter;
mod route_generation_service;
mod route_visualizer;

pub use health_service::{HealthConfig, HealthReport, HealthService, ServiceHealth};
pub use reconciliation_service::{ReconciliationConfig, ReconciliationService};
pub use route_formatter::{format_distance_km, format_duration_minutes};
pub use route_generation_service::{GenerationOutcome, RouteBatch, RouteGenerationService};
pub use route_visualizer::{RenderKind, RouteView, RouteVisualizer, VisualizerState};
