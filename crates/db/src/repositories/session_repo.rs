//! Repository for the `patron_sessions` table (the Session Resolver).
//!
//! Maps an inbound caller to a stable patron identity scoped to one venue.
//! Tokens are opaque UUIDs generated here; no signing or claims.

use sqlx::PgPool;
use uuid::Uuid;

use encore_core::types::DbId;

use crate::models::session::{OpenSession, PatronSession};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, venue_id, session_token, account_ref, table_tag, \
                        expires_at, is_revoked, created_at, updated_at";

/// Provides lifecycle operations for patron sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Open a new patron session at a venue, generating its token.
    pub async fn open(
        pool: &PgPool,
        venue_id: DbId,
        input: &OpenSession,
        ttl_hours: i64,
    ) -> Result<PatronSession, sqlx::Error> {
        let token = Uuid::new_v4().to_string();
        let query = format!(
            "INSERT INTO patron_sessions \
                 (venue_id, session_token, account_ref, table_tag, expires_at) \
             VALUES ($1, $2, $3, $4, NOW() + make_interval(hours => $5::INT)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PatronSession>(&query)
            .bind(venue_id)
            .bind(&token)
            .bind(&input.account_ref)
            .bind(&input.table_tag)
            .bind(ttl_hours)
            .fetch_one(pool)
            .await
    }

    /// Resolve an active session by its token.
    ///
    /// Only returns sessions that are not revoked and not expired.
    pub async fn find_by_token(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<PatronSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM patron_sessions \
             WHERE session_token = $1 \
               AND is_revoked = false \
               AND expires_at > NOW()"
        );
        sqlx::query_as::<_, PatronSession>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// Revoke a single session. Returns `true` if the row was updated.
    pub async fn revoke(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE patron_sessions SET is_revoked = true WHERE id = $1 AND is_revoked = false",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete expired or revoked sessions with no requests on record.
    /// Returns the count of deleted rows.
    pub async fn cleanup_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM patron_sessions s \
             WHERE (s.expires_at < NOW() OR s.is_revoked = true) \
               AND NOT EXISTS (SELECT 1 FROM requests r WHERE r.patron_id = s.id)",
        )
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
