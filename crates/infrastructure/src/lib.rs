//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the OSRM routing
//! adapter, the route-generation backend adapter, the JSONL destination
//! catalog and the GeoJSON drawing surface. Also owns configuration loading
//! and logging initialization.

pub mod adapters;
pub mod catalog;
pub mod config;
pub mod renderer;
pub mod telemetry;

pub use adapters::*;
pub use catalog::{CatalogConfig, JsonlDestinationCatalog, parse_jsonl};
pub use config::{AppConfig, OriginConfig, ServerConfig};
pub use renderer::GeoJsonRenderer;
pub use telemetry::{LoggingConfig, TelemetryError, init_logging};
