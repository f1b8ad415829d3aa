//! Destination catalog handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use domain::Destination;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Query parameters for listing destinations
#[derive(Debug, Default, Deserialize)]
pub struct DestinationQuery {
    /// Only destinations carrying this category tag
    #[serde(default)]
    pub category: Option<String>,
}

/// Destination list response
#[derive(Debug, Serialize, Deserialize)]
pub struct DestinationListResponse {
    /// Number of destinations returned
    pub count: usize,
    /// The destinations, in catalog order
    pub destinations: Vec<Destination>,
}

/// List destinations, optionally filtered by category
///
/// GET /v1/destinations?category=kuliner
#[instrument(skip(state))]
pub async fn list_destinations(
    State(state): State<AppState>,
    Query(query): Query<DestinationQuery>,
) -> Result<Json<DestinationListResponse>, ApiError> {
    let destinations = match query.category.as_deref().map(str::trim) {
        Some(category) if !category.is_empty() => {
            state.catalog.filter_by_category(category).await?
        },
        _ => state.catalog.all().await?,
    };

    Ok(Json(DestinationListResponse {
        count: destinations.len(),
        destinations,
    }))
}

/// Get one destination by place id
///
/// GET /v1/destinations/{place_id}
#[instrument(skip(state))]
pub async fn get_destination(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
) -> Result<Json<Destination>, ApiError> {
    state
        .catalog
        .find_by_place_id(&place_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Destination {place_id} not found")))
}
