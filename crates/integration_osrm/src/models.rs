//! OSRM wire models
//!
//! Raw response types for the `/route/v1` service and the conversions at the
//! engine boundary. OSRM speaks `longitude,latitude`; everything past this
//! module is `(latitude, longitude)`.

use std::fmt;

use domain::{InvalidCoordinates, TransportMode, Waypoint};
use serde::Deserialize;

/// Routing profile understood by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsrmProfile {
    /// Motor-vehicle routing
    Car,
    /// Pedestrian routing
    Foot,
}

impl OsrmProfile {
    /// Select the engine profile for a transport mode
    ///
    /// The engine has no motorcycle profile, so two-wheeled travel reuses
    /// the car profile.
    #[must_use]
    pub const fn for_mode(mode: TransportMode) -> Self {
        match mode {
            TransportMode::Car | TransportMode::TwoWheeled => Self::Car,
            TransportMode::Walking => Self::Foot,
        }
    }

    /// Path segment used in the request URL
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Foot => "foot",
        }
    }
}

impl fmt::Display for OsrmProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Render waypoints as the engine's `lon,lat;lon,lat` path parameter
#[must_use]
pub fn format_coordinates(waypoints: &[Waypoint]) -> String {
    waypoints
        .iter()
        .map(|w| format!("{},{}", w.longitude(), w.latitude()))
        .collect::<Vec<_>>()
        .join(";")
}

/// Convert an engine `[lon, lat]` pair to a waypoint
///
/// # Errors
///
/// Returns `InvalidCoordinates` if the pair is out of range.
pub fn lon_lat_to_waypoint(pair: [f64; 2]) -> Result<Waypoint, InvalidCoordinates> {
    let [longitude, latitude] = pair;
    Waypoint::new(latitude, longitude)
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
pub(crate) struct RawRouteResponse {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub routes: Vec<RawRoute>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawRoute {
    pub distance: f64,
    pub duration: f64,
    #[serde(default)]
    pub geometry: RawGeometry,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawGeometry {
    #[serde(default)]
    pub coordinates: Vec<[f64; 2]>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_mapping() {
        assert_eq!(OsrmProfile::for_mode(TransportMode::Car), OsrmProfile::Car);
        assert_eq!(
            OsrmProfile::for_mode(TransportMode::TwoWheeled),
            OsrmProfile::Car
        );
        assert_eq!(
            OsrmProfile::for_mode(TransportMode::Walking),
            OsrmProfile::Foot
        );
        assert_eq!(OsrmProfile::Foot.to_string(), "foot");
    }

    #[test]
    fn test_format_coordinates_uses_lon_lat() {
        let waypoints = [
            Waypoint::new(-7.2458, 112.7378).unwrap(),
            Waypoint::new(-7.26, 112.75).unwrap(),
        ];
        assert_eq!(
            format_coordinates(&waypoints),
            "112.7378,-7.2458;112.75,-7.26"
        );
    }

    #[test]
    fn test_lon_lat_conversion() {
        let wp = lon_lat_to_waypoint([112.7378, -7.2458]).unwrap();
        assert!((wp.latitude() - -7.2458).abs() < f64::EPSILON);
        assert!((wp.longitude() - 112.7378).abs() < f64::EPSILON);
    }

    #[test]
    fn test_lon_lat_conversion_rejects_out_of_range() {
        assert!(lon_lat_to_waypoint([112.0, 95.0]).is_err());
    }

    #[test]
    fn test_raw_response_tolerates_missing_routes() {
        let raw: RawRouteResponse = serde_json::from_str(r#"{ "code": "Ok" }"#).unwrap();
        assert!(raw.routes.is_empty());
        assert_eq!(raw.code.as_deref(), Some("Ok"));
    }
}
