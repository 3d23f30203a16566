//! Handlers for the `/venues` resource (venue catalog management).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use encore_core::error::CoreError;
use encore_core::types::DbId;
use encore_db::models::venue::{CreateVenue, UpdateVenue};
use encore_db::repositories::VenueRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for venue listings.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

/// POST /api/v1/venues
///
/// Register a venue. Returns 201 with the created row.
pub async fn create_venue(
    State(state): State<AppState>,
    Json(input): Json<CreateVenue>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let venue = VenueRepo::create(&state.pool, &input).await?;

    tracing::info!(venue_id = venue.id, slug = %venue.slug, "Venue created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: venue })))
}

/// GET /api/v1/venues
pub async fn list_venues(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> AppResult<impl IntoResponse> {
    let venues = VenueRepo::list(&state.pool, params.include_inactive).await?;
    Ok(Json(DataResponse { data: venues }))
}

/// GET /api/v1/venues/{id}
pub async fn get_venue(
    State(state): State<AppState>,
    Path(venue_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let venue = VenueRepo::find_by_id(&state.pool, venue_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Venue",
            id: venue_id,
        }))?;
    Ok(Json(DataResponse { data: venue }))
}

/// PUT /api/v1/venues/{id}
///
/// Update venue metadata or admission caps. Cap changes apply to the next
/// admission; they never reshuffle requests already in the queue.
pub async fn update_venue(
    State(state): State<AppState>,
    Path(venue_id): Path<DbId>,
    Json(input): Json<UpdateVenue>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let venue = VenueRepo::update(&state.pool, venue_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Venue",
            id: venue_id,
        }))?;

    tracing::info!(
        venue_id,
        max_requests_per_patron = venue.max_requests_per_patron,
        queue_limit = venue.queue_limit,
        "Venue updated",
    );

    Ok(Json(DataResponse { data: venue }))
}

/// DELETE /api/v1/venues/{id}
///
/// Deactivate a venue. Existing requests stay on record; new submissions
/// are rejected with `NotFound`.
pub async fn deactivate_venue(
    State(state): State<AppState>,
    Path(venue_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let changed = VenueRepo::deactivate(&state.pool, venue_id).await?;
    if !changed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Venue",
            id: venue_id,
        }));
    }

    tracing::info!(venue_id, "Venue deactivated");

    Ok(StatusCode::NO_CONTENT)
}
