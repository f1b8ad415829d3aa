//! Route handlers
//!
//! Generation against the backend, reconciliation of caller-supplied
//! batches and geometry for a single route.

use std::sync::Arc;

use application::{
    GenerationOutcome, RouteBatch, RouteView, RouteVisualizer, format_distance_km,
    format_duration_minutes,
};
use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use domain::{CandidateRoute, Destination, PlanStatistics, TransportMode, Waypoint};
use infrastructure::GeoJsonRenderer;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// A point given as latitude and longitude
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct Coordinates {
    #[validate(range(min = -90.0, max = 90.0, message = "must be between -90 and 90"))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "must be between -180 and 180"))]
    pub longitude: f64,
}

impl Coordinates {
    fn to_waypoint(self) -> Result<Waypoint, ApiError> {
        Waypoint::new(self.latitude, self.longitude)
            .map_err(|e| ApiError::BadRequest(e.to_string()))
    }
}

impl From<Waypoint> for Coordinates {
    fn from(waypoint: Waypoint) -> Self {
        Self {
            latitude: waypoint.latitude(),
            longitude: waypoint.longitude(),
        }
    }
}

/// One stop of a caller-supplied route
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StopInput {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    #[validate(range(min = -90.0, max = 90.0, message = "must be between -90 and 90"))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "must be between -180 and 180"))]
    pub longitude: f64,
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// A caller-supplied candidate route
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RouteInput {
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub rank: u32,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub total_distance_km: f64,
    /// Present when the route was already reconciled against the road network
    #[serde(default)]
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub estimated_duration_minutes: Option<f64>,
    #[validate(length(min = 1, message = "must contain at least one stop"), nested)]
    pub destinations: Vec<StopInput>,
}

impl RouteInput {
    fn into_candidate(self) -> Result<CandidateRoute, ApiError> {
        let destinations = self
            .destinations
            .into_iter()
            .zip(1u32..)
            .map(|(stop, order)| {
                let coordinates = Coordinates {
                    latitude: stop.latitude,
                    longitude: stop.longitude,
                }
                .to_waypoint()?;
                let mut destination = Destination::new(stop.name, coordinates)
                    .with_order(order)
                    .with_categories(stop.categories);
                destination.place_id = stop.place_id;
                Ok(destination)
            })
            .collect::<Result<Vec<_>, ApiError>>()?;

        let route = CandidateRoute::new(self.rank, destinations, self.total_distance_km)
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        Ok(match self.estimated_duration_minutes {
            Some(minutes) => route.with_duration_minutes(minutes),
            None => route,
        })
    }
}

/// A route as presented to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteResponse {
    pub rank: u32,
    pub total_distance_km: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_duration_minutes: Option<f64>,
    /// e.g. "7.3 km"
    pub distance_display: String,
    /// e.g. "1 jam 5 menit"; absent when the road network was not consulted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_display: Option<String>,
    /// True if distance and duration come from the routing engine
    pub reconciled: bool,
    pub destinations: Vec<Destination>,
}

impl From<&CandidateRoute> for RouteResponse {
    fn from(route: &CandidateRoute) -> Self {
        Self {
            rank: route.rank(),
            total_distance_km: route.total_distance_km(),
            estimated_duration_minutes: route.estimated_duration_minutes(),
            distance_display: format_distance_km(route.total_distance_km()),
            duration_display: route.estimated_duration_minutes().map(format_duration_minutes),
            reconciled: route.reconciliation().is_reconciled(),
            destinations: route.destinations().to_vec(),
        }
    }
}

fn present(routes: &[CandidateRoute]) -> Vec<RouteResponse> {
    routes.iter().map(RouteResponse::from).collect()
}

/// A committed batch as presented to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    pub generation: u64,
    pub origin: Coordinates,
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<PlanStatistics>,
    pub routes: Vec<RouteResponse>,
}

impl From<&RouteBatch> for BatchResponse {
    fn from(batch: &RouteBatch) -> Self {
        Self {
            generation: batch.generation,
            origin: batch.origin.into(),
            generated_at: batch.generated_at,
            statistics: batch.statistics,
            routes: present(&batch.routes),
        }
    }
}

/// Request body for generating routes
#[derive(Debug, Default, Deserialize, Validate)]
pub struct GenerateRequest {
    /// Starting point; the configured default origin if absent
    #[serde(default)]
    #[validate(nested)]
    pub origin: Option<Coordinates>,
}

/// Result of a generate action
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerateResponse {
    Committed(BatchResponse),
    Superseded { generation: u64, latest: u64 },
}

/// Generate, reconcile and commit a batch of candidate routes
///
/// POST /v1/routes/generate
///
/// Answers 409 if a newer generate action started before this one finished.
#[instrument(skip(state, request))]
pub async fn generate_routes(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<GenerateRequest>,
) -> Result<(StatusCode, Json<GenerateResponse>), ApiError> {
    let origin = match request.origin {
        Some(origin) => origin.to_waypoint()?,
        None => state.default_origin(),
    };

    match state.generation.generate(origin).await? {
        GenerationOutcome::Committed(batch) => Ok((
            StatusCode::OK,
            Json(GenerateResponse::Committed(BatchResponse::from(&batch))),
        )),
        GenerationOutcome::Superseded { generation, latest } => Ok((
            StatusCode::CONFLICT,
            Json(GenerateResponse::Superseded { generation, latest }),
        )),
    }
}

/// The current batch
///
/// GET /v1/routes/current
pub async fn current_batch(State(state): State<AppState>) -> Result<Json<BatchResponse>, ApiError> {
    state
        .generation
        .current()
        .map(|batch| Json(BatchResponse::from(&batch)))
        .ok_or_else(|| ApiError::NotFound("No routes have been generated yet".to_string()))
}

/// Request body for reconciling a caller-supplied batch
#[derive(Debug, Deserialize, Validate)]
pub struct ReconcileRequest {
    #[serde(default)]
    #[validate(nested)]
    pub origin: Option<Coordinates>,
    #[validate(nested)]
    pub routes: Vec<RouteInput>,
}

/// A reconciled batch
#[derive(Debug, Serialize, Deserialize)]
pub struct ReconcileResponse {
    pub origin: Coordinates,
    pub routes: Vec<RouteResponse>,
}

/// Reconcile routes against the road network and rank them by distance
///
/// POST /v1/routes/reconcile
#[instrument(skip(state, request), fields(routes = request.routes.len()))]
pub async fn reconcile_routes(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ReconcileRequest>,
) -> Result<Json<ReconcileResponse>, ApiError> {
    let origin = match request.origin {
        Some(origin) => origin.to_waypoint()?,
        None => state.default_origin(),
    };
    let routes = request
        .routes
        .into_iter()
        .map(RouteInput::into_candidate)
        .collect::<Result<Vec<_>, _>>()?;

    let reconciled = state.reconciler.reconcile(routes, origin).await?;

    Ok(Json(ReconcileResponse {
        origin: origin.into(),
        routes: present(&reconciled),
    }))
}

/// Request body for single-route geometry
///
/// Either an explicit `route`, or a `rank` in the current batch (rank 1 if
/// neither is given).
#[derive(Debug, Default, Deserialize, Validate)]
pub struct GeometryRequest {
    #[serde(default)]
    pub mode: TransportMode,
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    #[validate(nested)]
    pub route: Option<RouteInput>,
    #[serde(default)]
    #[validate(nested)]
    pub origin: Option<Coordinates>,
}

/// Geometry for one route and mode
#[derive(Debug, Serialize, Deserialize)]
pub struct GeometryResponse {
    pub view: RouteView,
    /// e.g. "7.3 km, 25 menit"; absent on straight-line fallback
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Markers and path as a GeoJSON FeatureCollection
    pub geojson: serde_json::Value,
}

/// Draw one route for one transport mode
///
/// POST /v1/routes/geometry
#[instrument(skip(state, request), fields(mode = %request.mode))]
pub async fn route_geometry(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<GeometryRequest>,
) -> Result<Json<GeometryResponse>, ApiError> {
    let requested_origin = request.origin.map(Coordinates::to_waypoint).transpose()?;

    let (route, origin) = if let Some(route) = request.route {
        (
            route.into_candidate()?,
            requested_origin.unwrap_or_else(|| state.default_origin()),
        )
    } else {
        let batch = state
            .generation
            .current()
            .ok_or_else(|| ApiError::NotFound("No routes have been generated yet".to_string()))?;
        let rank = request.rank.unwrap_or(1);
        let route = batch
            .by_rank(rank)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Route rank {rank} not found")))?;
        (route, requested_origin.unwrap_or(batch.origin))
    };

    let mut visualizer = RouteVisualizer::new(Arc::clone(&state.routing), GeoJsonRenderer::new());
    let view = visualizer.show(&route, origin, request.mode).await?;
    info!(rank = view.rank, fallback = view.is_fallback(), "Route geometry served");

    Ok(Json(GeometryResponse {
        summary: view.summary(),
        geojson: visualizer.renderer().feature_collection(),
        view,
    }))
}
