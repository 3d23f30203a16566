//! Request entity models, DTOs, and read projections.

use encore_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::StatusId;

/// A row from the `requests` table.
///
/// `queue_position` is non-NULL exactly while the request is pending; it
/// is cleared on every transition out of the pending set.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Request {
    pub id: DbId,
    pub venue_id: DbId,
    pub patron_id: DbId,
    pub track_id: DbId,
    pub status_id: StatusId,
    pub queue_position: Option<i32>,
    pub table_tag: Option<String>,
    pub submitted_at: Timestamp,
    pub started_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for submitting a request via `POST /venues/{id}/requests`.
#[derive(Debug, Deserialize, validator::Validate)]
pub struct SubmitRequest {
    pub track_id: DbId,
    /// Optional display label overriding the session's table tag.
    #[validate(length(max = 100))]
    pub table_tag: Option<String>,
}

/// Query parameters for patron request history listings.
#[derive(Debug, Default, Deserialize)]
pub struct RequestListQuery {
    /// Filter by status ID (e.g. 1 = pending, 2 = playing).
    pub status_id: Option<StatusId>,
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}

/// One pending queue entry joined with its track for display.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QueueEntryView {
    pub id: DbId,
    pub venue_id: DbId,
    pub patron_id: DbId,
    pub track_id: DbId,
    pub queue_position: i32,
    pub table_tag: Option<String>,
    pub submitted_at: Timestamp,
    pub track_title: String,
    pub track_artist: Option<String>,
}

/// Aggregate request counts by status for one venue.
#[derive(Debug, Clone, Copy, Default, FromRow, Serialize)]
pub struct QueueCounts {
    pub pending: i64,
    pub playing: i64,
    pub completed: i64,
    pub cancelled: i64,
}
