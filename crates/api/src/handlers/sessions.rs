//! Handlers for patron sessions (the Session Resolver's issuing half).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use encore_core::error::CoreError;
use encore_core::types::DbId;
use encore_db::models::session::OpenSession;
use encore_db::repositories::{SessionRepo, VenueRepo};

use crate::error::{AppError, AppResult};
use crate::extract::Patron;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/venues/{id}/sessions
///
/// Open a patron session at a venue (anonymous table session or a
/// registered account via `account_ref`). Returns 201 with the session,
/// including the token the client must send as `x-session-token`.
pub async fn open_session(
    State(state): State<AppState>,
    Path(venue_id): Path<DbId>,
    Json(input): Json<OpenSession>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let venue = VenueRepo::find_by_id(&state.pool, venue_id)
        .await?
        .filter(|v| v.is_active)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Venue",
            id: venue_id,
        }))?;

    let session =
        SessionRepo::open(&state.pool, venue.id, &input, state.config.session_ttl_hours).await?;

    tracing::info!(
        patron_id = session.id,
        venue_id,
        table_tag = ?session.table_tag,
        "Patron session opened",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: session })))
}

/// DELETE /api/v1/sessions/current
///
/// Revoke the calling patron's own session.
pub async fn close_session(
    patron: Patron,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    SessionRepo::revoke(&state.pool, patron.patron_id).await?;

    tracing::info!(patron_id = patron.patron_id, "Patron session closed");

    Ok(StatusCode::NO_CONTENT)
}
