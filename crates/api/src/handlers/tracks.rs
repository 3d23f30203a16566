//! Handlers for the per-venue track catalog.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use encore_core::error::CoreError;
use encore_core::types::DbId;
use encore_db::models::track::{CreateTrack, UpdateTrack};
use encore_db::repositories::{TrackRepo, VenueRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for track listings.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

/// POST /api/v1/venues/{id}/tracks
///
/// Add a track to the venue's catalog. Returns 201 with the created row.
pub async fn create_track(
    State(state): State<AppState>,
    Path(venue_id): Path<DbId>,
    Json(input): Json<CreateTrack>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    ensure_venue(&state, venue_id).await?;
    let track = TrackRepo::create(&state.pool, venue_id, &input).await?;

    tracing::info!(track_id = track.id, venue_id, title = %track.title, "Track added");

    Ok((StatusCode::CREATED, Json(DataResponse { data: track })))
}

/// GET /api/v1/venues/{id}/tracks
pub async fn list_tracks(
    State(state): State<AppState>,
    Path(venue_id): Path<DbId>,
    Query(params): Query<ListQuery>,
) -> AppResult<impl IntoResponse> {
    ensure_venue(&state, venue_id).await?;
    let tracks = TrackRepo::list_by_venue(&state.pool, venue_id, params.include_inactive).await?;
    Ok(Json(DataResponse { data: tracks }))
}

/// PUT /api/v1/tracks/{id}
pub async fn update_track(
    State(state): State<AppState>,
    Path(track_id): Path<DbId>,
    Json(input): Json<UpdateTrack>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let track = TrackRepo::update(&state.pool, track_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Track",
            id: track_id,
        }))?;
    Ok(Json(DataResponse { data: track }))
}

/// DELETE /api/v1/tracks/{id}
///
/// Deactivate a track. Outstanding requests for it are untouched; new
/// submissions are rejected with `NotFound`.
pub async fn deactivate_track(
    State(state): State<AppState>,
    Path(track_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let changed = TrackRepo::deactivate(&state.pool, track_id).await?;
    if !changed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Track",
            id: track_id,
        }));
    }

    tracing::info!(track_id, "Track deactivated");

    Ok(StatusCode::NO_CONTENT)
}

/// Verify the path venue exists before touching its catalog.
async fn ensure_venue(state: &AppState, venue_id: DbId) -> AppResult<()> {
    VenueRepo::find_by_id(&state.pool, venue_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Venue",
            id: venue_id,
        }))?;
    Ok(())
}
