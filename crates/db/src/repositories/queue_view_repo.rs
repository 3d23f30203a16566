//! Read-only queue projections.
//!
//! Display paths only. None of these reads participates in admission;
//! `RequestRepo` takes its own snapshot under the venue lock.

use sqlx::PgPool;

use encore_core::types::DbId;

use crate::models::request::{QueueCounts, QueueEntryView, Request, RequestListQuery};
use crate::models::status::RequestStatus;

/// Maximum page size for request history listings.
const MAX_LIMIT: i64 = 100;

/// Default page size for request history listings.
const DEFAULT_LIMIT: i64 = 50;

/// Read views of a venue's queue and a patron's request history.
pub struct QueueViewRepo;

impl QueueViewRepo {
    /// The venue's pending queue, ordered by position ascending, joined
    /// with track metadata for display.
    pub async fn list_pending(
        pool: &PgPool,
        venue_id: DbId,
    ) -> Result<Vec<QueueEntryView>, sqlx::Error> {
        sqlx::query_as::<_, QueueEntryView>(
            "SELECT r.id, r.venue_id, r.patron_id, r.track_id, r.queue_position, \
                    r.table_tag, r.submitted_at, \
                    t.title AS track_title, t.artist AS track_artist \
             FROM requests r \
             JOIN tracks t ON t.id = r.track_id \
             WHERE r.venue_id = $1 AND r.status_id = $2 \
             ORDER BY r.queue_position ASC",
        )
        .bind(venue_id)
        .bind(RequestStatus::Pending.id())
        .fetch_all(pool)
        .await
    }

    /// All of one patron's requests, any status, most recent first.
    pub async fn list_by_patron(
        pool: &PgPool,
        patron_id: DbId,
        params: &RequestListQuery,
    ) -> Result<Vec<Request>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let offset = params.offset.unwrap_or(0);

        // Build the WHERE clause and track the next bind parameter index.
        let mut conditions = vec!["patron_id = $1".to_string()];
        let mut bind_idx: u32 = 2;

        if params.status_id.is_some() {
            conditions.push(format!("status_id = ${bind_idx}"));
            bind_idx += 1;
        }

        let query = format!(
            "SELECT id, venue_id, patron_id, track_id, status_id, queue_position, \
                    table_tag, submitted_at, started_at, completed_at, \
                    created_at, updated_at \
             FROM requests \
             WHERE {} \
             ORDER BY submitted_at DESC, id DESC \
             LIMIT ${bind_idx} OFFSET ${}",
            conditions.join(" AND "),
            bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, Request>(&query).bind(patron_id);
        if let Some(sid) = params.status_id {
            q = q.bind(sid);
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Aggregate request counts by status for one venue.
    pub async fn counts_by_status(
        pool: &PgPool,
        venue_id: DbId,
    ) -> Result<QueueCounts, sqlx::Error> {
        sqlx::query_as::<_, QueueCounts>(
            "SELECT COUNT(*) FILTER (WHERE status_id = $2) AS pending, \
                    COUNT(*) FILTER (WHERE status_id = $3) AS playing, \
                    COUNT(*) FILTER (WHERE status_id = $4) AS completed, \
                    COUNT(*) FILTER (WHERE status_id = $5) AS cancelled \
             FROM requests WHERE venue_id = $1",
        )
        .bind(venue_id)
        .bind(RequestStatus::Pending.id())
        .bind(RequestStatus::Playing.id())
        .bind(RequestStatus::Completed.id())
        .bind(RequestStatus::Cancelled.id())
        .fetch_one(pool)
        .await
    }

    /// Average observed playback length for the venue's completed
    /// requests, in seconds. `None` when there is no history yet.
    pub async fn avg_track_secs(
        pool: &PgPool,
        venue_id: DbId,
    ) -> Result<Option<f64>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT AVG(EXTRACT(EPOCH FROM completed_at - started_at))::DOUBLE PRECISION \
             FROM requests \
             WHERE venue_id = $1 AND status_id = $2 \
               AND started_at IS NOT NULL AND completed_at IS NOT NULL",
        )
        .bind(venue_id)
        .bind(RequestStatus::Completed.id())
        .fetch_one(pool)
        .await
    }
}
