//! Backend wire models and their conversion to domain types
//!
//! The backend speaks Indonesian field names and `[latitude, longitude]`
//! coordinate arrays.

use domain::{CandidateRoute, Destination, DomainError, PlanStatistics, RoutePlan, Waypoint};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Request body for `POST /generate-routes`
#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct GenerateRoutesRequest {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Waypoint> for GenerateRoutesRequest {
    fn from(origin: Waypoint) -> Self {
        Self {
            latitude: origin.latitude(),
            longitude: origin.longitude(),
        }
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
pub(crate) struct RawApiResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<RawResponseData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawResponseData {
    #[serde(default)]
    pub user_location: Option<RawLocation>,
    #[serde(default)]
    pub statistics: Option<RawStatistics>,
    #[serde(default)]
    pub routes: Vec<RawRoute>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct RawLocation {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawStatistics {
    #[serde(default)]
    pub total_generations: u32,
    #[serde(default)]
    pub best_distance_km: f64,
    #[serde(default)]
    pub initial_fitness: f64,
    #[serde(default)]
    pub final_fitness: f64,
    #[serde(default)]
    pub improvement_percentage: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawRoute {
    #[serde(default)]
    pub rank: u32,
    #[serde(default)]
    pub start_point: Option<[f64; 2]>,
    pub total_distance_km: f64,
    #[serde(default)]
    pub destinations: Vec<RawDestination>,
    #[serde(default = "default_true")]
    pub is_valid_order: bool,
    #[serde(default)]
    pub fitness: f64,
}

const fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawDestination {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub order: u32,
    pub nama: String,
    #[serde(default)]
    pub kategori: Vec<String>,
    pub coordinates: [f64; 2],
    #[serde(default)]
    pub deskripsi: Option<String>,
    #[serde(default)]
    pub gambar: Option<String>,
    #[serde(default)]
    pub alamat: Option<String>,
    #[serde(default)]
    pub jam_buka: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
}

fn lat_lon(pair: [f64; 2]) -> Result<Waypoint, DomainError> {
    let [latitude, longitude] = pair;
    Ok(Waypoint::new(latitude, longitude)?)
}

impl RawDestination {
    fn into_domain(self) -> Result<Destination, DomainError> {
        let mut dest = Destination::new(self.nama, lat_lon(self.coordinates)?)
            .with_order(self.order)
            .with_categories(self.kategori);
        dest.place_id = self.place_id.filter(|id| !id.trim().is_empty());
        dest.description = self.deskripsi;
        dest.address = self.alamat;
        dest.opening_hours = self.jam_buka;
        dest.rating = self.rating;
        dest.image_url = self.image_url.or(self.gambar);
        Ok(dest)
    }
}

impl RawRoute {
    fn into_domain(self) -> Result<CandidateRoute, DomainError> {
        let destinations = self
            .destinations
            .into_iter()
            .map(RawDestination::into_domain)
            .collect::<Result<Vec<_>, _>>()?;

        let mut route = CandidateRoute::new(self.rank, destinations, self.total_distance_km)?
            .with_valid_order(self.is_valid_order)
            .with_fitness(self.fitness);
        if let Some(start) = self.start_point {
            route = route.with_start_point(lat_lon(start)?);
        }
        Ok(route)
    }
}

impl From<RawStatistics> for PlanStatistics {
    fn from(raw: RawStatistics) -> Self {
        Self {
            total_generations: raw.total_generations,
            best_distance_km: raw.best_distance_km,
            initial_fitness: raw.initial_fitness,
            final_fitness: raw.final_fitness,
            improvement_percentage: raw.improvement_percentage,
        }
    }
}

impl RawResponseData {
    /// Convert to a plan, dropping candidates the domain rejects
    ///
    /// The plan starts at `requested_origin`; the location echoed by the
    /// backend is informational only.
    pub(crate) fn into_plan(self, requested_origin: Waypoint) -> RoutePlan {
        if let Some(echoed) = self.user_location {
            if (echoed.latitude, echoed.longitude)
                != (requested_origin.latitude(), requested_origin.longitude())
            {
                debug!(
                    echoed_latitude = echoed.latitude,
                    echoed_longitude = echoed.longitude,
                    origin = %requested_origin,
                    "Backend echoed a different location, keeping the requested origin"
                );
            }
        }
        let origin = requested_origin;

        let routes = self
            .routes
            .into_iter()
            .enumerate()
            .filter_map(|(index, raw)| match raw.into_domain() {
                Ok(route) => Some(route),
                Err(e) => {
                    warn!(index, error = %e, "Dropping malformed candidate route");
                    None
                },
            })
            .collect();

        let plan = RoutePlan::new(origin, routes);
        match self.statistics {
            Some(stats) => plan.with_statistics(stats.into()),
            None => plan,
        }
    }
}
