//! Handler for the venue queue view.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use encore_core::error::CoreError;
use encore_core::queue;
use encore_core::types::DbId;
use encore_db::models::request::{QueueCounts, QueueEntryView};
use encore_db::repositories::{QueueViewRepo, VenueRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Response for GET /venues/{id}/queue.
#[derive(Debug, Serialize)]
pub struct QueueStatusResponse {
    pub counts: QueueCounts,
    /// Estimated wait for a request submitted now (tail of the queue).
    pub estimated_wait_secs: i64,
    pub entries: Vec<QueueEntryView>,
}

/// GET /api/v1/venues/{id}/queue
///
/// The venue's pending queue in position order, aggregate counts, and the
/// wait a new submission would see.
pub async fn get_queue(
    State(state): State<AppState>,
    Path(venue_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    VenueRepo::find_by_id(&state.pool, venue_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Venue",
            id: venue_id,
        }))?;

    let entries = QueueViewRepo::list_pending(&state.pool, venue_id).await?;
    let counts = QueueViewRepo::counts_by_status(&state.pool, venue_id).await?;
    let avg = QueueViewRepo::avg_track_secs(&state.pool, venue_id).await?;

    // A new submission would land at position pending + 1.
    let next_position = i32::try_from(counts.pending + 1).unwrap_or(i32::MAX);
    let estimated_wait_secs = queue::estimated_wait_secs(next_position, avg);

    Ok(Json(DataResponse {
        data: QueueStatusResponse {
            counts,
            estimated_wait_secs,
            entries,
        },
    }))
}
