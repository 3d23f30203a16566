//! Handlers for the `/requests` resource: submission, transitions, and
//! patron history.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use encore_core::error::CoreError;
use encore_core::queue;
use encore_core::types::DbId;
use encore_db::models::request::{Request, RequestListQuery, SubmitRequest};
use encore_db::models::status::RequestStatus;
use encore_db::repositories::{QueueViewRepo, RequestRepo};

use crate::error::{AppError, AppResult};
use crate::extract::Patron;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Response for a successful submission: the request plus a display-only
/// wait estimate.
#[derive(Debug, Serialize)]
pub struct SubmittedRequest {
    #[serde(flatten)]
    pub request: Request,
    pub estimated_wait_secs: i64,
}

/// Request body for POST /requests/{id}/transition.
#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    /// Target status name: `playing`, `completed`, or `cancelled`.
    pub target: String,
}

// ---------------------------------------------------------------------------
// Submit
// ---------------------------------------------------------------------------

/// POST /api/v1/venues/{id}/requests
///
/// Submit a song request. The patron comes from the `x-session-token`
/// header and must belong to the path venue. Returns 201 with the admitted
/// request and its estimated wait.
pub async fn submit_request(
    patron: Patron,
    State(state): State<AppState>,
    Path(venue_id): Path<DbId>,
    Json(mut input): Json<SubmitRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    if patron.venue_id != venue_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Session belongs to a different venue".into(),
        )));
    }

    // Default the display tag to the session's table label.
    if input.table_tag.is_none() {
        input.table_tag = patron.table_tag.clone();
    }

    let request = RequestRepo::submit(&state.pool, venue_id, patron.patron_id, &input).await?;

    let avg = QueueViewRepo::avg_track_secs(&state.pool, venue_id).await?;
    let estimated_wait_secs =
        queue::estimated_wait_secs(request.queue_position.unwrap_or(1), avg);

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SubmittedRequest {
                request,
                estimated_wait_secs,
            },
        }),
    ))
}

// ---------------------------------------------------------------------------
// Patron history
// ---------------------------------------------------------------------------

/// GET /api/v1/venues/{id}/requests/mine
///
/// The calling patron's requests at this venue, any status, most recent
/// first.
pub async fn list_my_requests(
    patron: Patron,
    State(state): State<AppState>,
    Path(venue_id): Path<DbId>,
    Query(params): Query<RequestListQuery>,
) -> AppResult<impl IntoResponse> {
    if patron.venue_id != venue_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Session belongs to a different venue".into(),
        )));
    }

    let requests = QueueViewRepo::list_by_patron(&state.pool, patron.patron_id, &params).await?;
    Ok(Json(DataResponse { data: requests }))
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

/// GET /api/v1/requests/{id}
pub async fn get_request(
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let request = RequestRepo::find_by_id(&state.pool, request_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Request",
            id: request_id,
        }))?;
    Ok(Json(DataResponse { data: request }))
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// POST /api/v1/requests/{id}/transition
///
/// Staff surface: advance a request through the playback state machine.
/// Illegal moves, including races where the status changed since the
/// caller last read it, return 409 `INVALID_TRANSITION`.
pub async fn transition_request(
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
    Json(input): Json<TransitionRequest>,
) -> AppResult<impl IntoResponse> {
    let target = RequestStatus::from_name(&input.target).ok_or_else(|| {
        AppError::BadRequest(format!("Unknown target status: {}", input.target))
    })?;

    let request = RequestRepo::transition(&state.pool, request_id, target).await?;
    Ok(Json(DataResponse { data: request }))
}

/// POST /api/v1/requests/{id}/cancel
///
/// Patron surface: cancel the caller's own request. Succeeds only while
/// the request is still cancellable (`pending` or `playing`).
pub async fn cancel_request(
    patron: Patron,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let request = RequestRepo::find_by_id(&state.pool, request_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Request",
            id: request_id,
        }))?;

    if request.patron_id != patron.patron_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot cancel another patron's request".into(),
        )));
    }

    let cancelled =
        RequestRepo::transition(&state.pool, request_id, RequestStatus::Cancelled).await?;
    Ok(Json(DataResponse { data: cancelled }))
}
