//! GeoJSON drawing surface
//!
//! Keeps the last markers and path it was given and exposes them as a
//! GeoJSON `FeatureCollection`. Positions are written `[longitude, latitude]`
//! as GeoJSON requires.

use application::ports::{MapMarker, PathStyle, RouteRenderer};
use domain::Waypoint;
use serde_json::{Value, json};

/// Renderer that accumulates map state as GeoJSON
#[derive(Debug, Clone, Default)]
pub struct GeoJsonRenderer {
    markers: Vec<MapMarker>,
    path: Option<(Vec<Waypoint>, PathStyle)>,
}

impl GeoJsonRenderer {
    /// Create an empty surface
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Markers currently drawn
    #[must_use]
    pub fn markers(&self) -> &[MapMarker] {
        &self.markers
    }

    /// Path currently drawn, with its style
    #[must_use]
    pub fn path(&self) -> Option<(&[Waypoint], PathStyle)> {
        self.path
            .as_ref()
            .map(|(vertices, style)| (vertices.as_slice(), *style))
    }

    /// True if nothing is drawn
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.markers.is_empty() && self.path.is_none()
    }

    /// Current surface as a GeoJSON `FeatureCollection`
    ///
    /// The path (if it has at least two vertices) comes first, then the
    /// markers in the order they were set.
    #[must_use]
    pub fn feature_collection(&self) -> Value {
        let path = self
            .path
            .iter()
            .filter(|(vertices, _)| vertices.len() >= 2)
            .map(|(vertices, style)| path_feature(vertices, *style));
        let markers = self.markers.iter().map(marker_feature);

        json!({
            "type": "FeatureCollection",
            "features": path.chain(markers).collect::<Vec<_>>(),
        })
    }
}

fn position(waypoint: &Waypoint) -> Value {
    json!([waypoint.longitude(), waypoint.latitude()])
}

fn marker_feature(marker: &MapMarker) -> Value {
    json!({
        "type": "Feature",
        "geometry": {
            "type": "Point",
            "coordinates": position(&marker.position),
        },
        "properties": {
            "kind": marker.kind,
            "label": marker.label,
        },
    })
}

fn path_feature(vertices: &[Waypoint], style: PathStyle) -> Value {
    json!({
        "type": "Feature",
        "geometry": {
            "type": "LineString",
            "coordinates": vertices.iter().map(position).collect::<Vec<_>>(),
        },
        "properties": {
            "style": style,
        },
    })
}

impl RouteRenderer for GeoJsonRenderer {
    fn set_markers(&mut self, markers: &[MapMarker]) {
        self.markers = markers.to_vec();
    }

    fn set_path(&mut self, path: &[Waypoint], style: PathStyle) {
        self.path = Some((path.to_vec(), style));
    }

    fn clear(&mut self) {
        self.markers.clear();
        self.path = None;
    }
}
