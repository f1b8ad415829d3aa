//! Concrete drawing surfaces for the route visualizer

mod geojson;

pub use geojson::GeoJsonRenderer;
