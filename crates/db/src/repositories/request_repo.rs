//! Repository for the `requests` table: admission, position assignment,
//! and state transitions.
//!
//! Both mutating operations run inside a single transaction that first
//! takes a `FOR UPDATE` row lock on the venue. That lock is the per-venue
//! serialization point: all five admission checks plus the insert, and
//! every transition plus its renumber, see a consistent snapshot of the
//! venue's pending set. Different venues never contend; a submit and a
//! transition for the same venue serialize in lock-acquisition order and
//! cannot deadlock because both operations lock the venue first.

use sqlx::{PgPool, Postgres, Transaction};

use encore_core::error::CoreError;
use encore_core::queue::{self, state_machine, QueueSnapshot};
use encore_core::types::DbId;

use crate::error::QueueError;
use crate::models::request::{Request, SubmitRequest};
use crate::models::status::RequestStatus;
use crate::models::venue::Venue;

/// Column list for `requests` queries.
const COLUMNS: &str = "\
    id, venue_id, patron_id, track_id, status_id, queue_position, \
    table_tag, submitted_at, started_at, completed_at, \
    created_at, updated_at";

/// Admission control, position assignment, and the playback state machine.
pub struct RequestRepo;

impl RequestRepo {
    /// Admit a new request into the venue's pending queue.
    ///
    /// Checks, in order, each short-circuiting: venue active, track active
    /// and owned by the venue, patron pending cap, venue queue cap,
    /// duplicate outstanding track. On success inserts the request as
    /// `pending` at position `venue pending count + 1` and commits.
    pub async fn submit(
        pool: &PgPool,
        venue_id: DbId,
        patron_id: DbId,
        input: &SubmitRequest,
    ) -> Result<Request, QueueError> {
        let mut tx = pool.begin().await?;

        let venue = Self::lock_venue(&mut tx, venue_id).await?;
        if !venue.is_active {
            return Err(QueueError::not_found("Venue", venue_id));
        }

        // Track must exist, be active, and belong to this venue.
        let track_ok: Option<(bool,)> =
            sqlx::query_as("SELECT is_active FROM tracks WHERE id = $1 AND venue_id = $2")
                .bind(input.track_id)
                .bind(venue_id)
                .fetch_optional(&mut *tx)
                .await?;
        match track_ok {
            Some((true,)) => {}
            _ => return Err(QueueError::not_found("Track", input.track_id)),
        }

        // Snapshot the pending set under the venue lock.
        let (venue_pending, patron_pending): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE patron_id = $2) \
             FROM requests \
             WHERE venue_id = $1 AND status_id = $3",
        )
        .bind(venue_id)
        .bind(patron_id)
        .bind(RequestStatus::Pending.id())
        .fetch_one(&mut *tx)
        .await?;

        let (outstanding,): (bool,) = sqlx::query_as(
            "SELECT EXISTS ( \
                 SELECT 1 FROM requests \
                 WHERE venue_id = $1 AND patron_id = $2 AND track_id = $3 \
                   AND status_id IN ($4, $5) \
             )",
        )
        .bind(venue_id)
        .bind(patron_id)
        .bind(input.track_id)
        .bind(RequestStatus::Pending.id())
        .bind(RequestStatus::Playing.id())
        .fetch_one(&mut *tx)
        .await?;

        queue::check_admission(
            venue.admission_limits(),
            QueueSnapshot {
                patron_pending,
                venue_pending,
                outstanding_for_track: outstanding,
            },
            input.track_id,
        )?;

        let insert_query = format!(
            "INSERT INTO requests \
                 (venue_id, patron_id, track_id, status_id, queue_position, table_tag) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let position = i32::try_from(venue_pending + 1)
            .map_err(|_| CoreError::Internal("pending count exceeds i32".into()))?;
        let request = sqlx::query_as::<_, Request>(&insert_query)
            .bind(venue_id)
            .bind(patron_id)
            .bind(input.track_id)
            .bind(RequestStatus::Pending.id())
            .bind(position)
            .bind(&input.table_tag)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            request_id = request.id,
            venue_id,
            patron_id,
            track_id = input.track_id,
            queue_position = position,
            "Request admitted",
        );

        Ok(request)
    }

    /// Apply a state transition to a request.
    ///
    /// The request's stored status is re-read under the venue lock
    /// immediately before the transition table is consulted, so a racing
    /// caller observes `InvalidTransition` rather than a double apply.
    /// When the transition removes the request from the pending set, every
    /// pending request behind it shifts down by one in the same
    /// transaction.
    pub async fn transition(
        pool: &PgPool,
        request_id: DbId,
        target: RequestStatus,
    ) -> Result<Request, QueueError> {
        // The venue of a request is immutable, so it can be read outside
        // the lock to establish lock order (venue first, then request).
        let venue_id: DbId = sqlx::query_scalar("SELECT venue_id FROM requests WHERE id = $1")
            .bind(request_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| QueueError::not_found("Request", request_id))?;

        let mut tx = pool.begin().await?;

        Self::lock_venue(&mut tx, venue_id).await?;

        let select_query = format!("SELECT {COLUMNS} FROM requests WHERE id = $1");
        let current = sqlx::query_as::<_, Request>(&select_query)
            .bind(request_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| QueueError::not_found("Request", request_id))?;

        state_machine::validate_transition(current.status_id, target.id())
            .map_err(QueueError::Domain)?;

        let update_query = format!(
            "UPDATE requests SET \
                status_id = $2, \
                queue_position = NULL, \
                started_at = CASE WHEN $2 = $3 THEN NOW() ELSE started_at END, \
                completed_at = CASE WHEN $2 = $4 THEN NOW() ELSE completed_at END \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Request>(&update_query)
            .bind(request_id)
            .bind(target.id())
            .bind(RequestStatus::Playing.id())
            .bind(RequestStatus::Completed.id())
            .fetch_one(&mut *tx)
            .await?;

        if state_machine::vacates_pending(current.status_id, target.id()) {
            let vacated = current.queue_position.ok_or_else(|| {
                CoreError::Internal(format!("pending request {request_id} has no position"))
            })?;
            Self::renumber_after(&mut tx, venue_id, vacated).await?;
        }

        tx.commit().await?;

        tracing::info!(
            request_id,
            venue_id,
            from = queue::status_name(current.status_id),
            to = target.name(),
            "Request transitioned",
        );

        Ok(updated)
    }

    /// Find a request by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Request>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM requests WHERE id = $1");
        sqlx::query_as::<_, Request>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Take the per-venue serialization lock. Every mutating queue
    /// operation goes through here first. Venue activity is a submission
    /// precondition only; transitions must keep working after a venue is
    /// deactivated so its outstanding requests can be drained.
    async fn lock_venue(
        tx: &mut Transaction<'_, Postgres>,
        venue_id: DbId,
    ) -> Result<Venue, QueueError> {
        sqlx::query_as::<_, Venue>(
            "SELECT id, name, slug, is_active, max_requests_per_patron, queue_limit, \
                    created_at, updated_at \
             FROM venues WHERE id = $1 \
             FOR UPDATE",
        )
        .bind(venue_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| QueueError::not_found("Venue", venue_id))
    }

    /// Close the gap left at `vacated`: shift every pending request behind
    /// it down by one. Runs inside the caller's transaction, under the
    /// venue lock, so readers never observe a gap or a duplicate position.
    async fn renumber_after(
        tx: &mut Transaction<'_, Postgres>,
        venue_id: DbId,
        vacated: i32,
    ) -> Result<(), QueueError> {
        let result = sqlx::query(
            "UPDATE requests \
             SET queue_position = queue_position - 1 \
             WHERE venue_id = $1 AND status_id = $2 AND queue_position > $3",
        )
        .bind(venue_id)
        .bind(RequestStatus::Pending.id())
        .bind(vacated)
        .execute(&mut **tx)
        .await?;

        tracing::debug!(
            venue_id,
            vacated,
            shifted = result.rows_affected(),
            "Queue renumbered",
        );

        Ok(())
    }
}
