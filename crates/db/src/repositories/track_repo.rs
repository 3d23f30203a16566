//! Repository for the `tracks` table (per-venue song catalog).

use sqlx::PgPool;

use encore_core::types::DbId;

use crate::models::track::{CreateTrack, Track, UpdateTrack};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, venue_id, title, artist, duration_secs, is_active, \
                        created_at, updated_at";

/// Provides CRUD operations for tracks.
pub struct TrackRepo;

impl TrackRepo {
    /// Insert a new track into a venue's catalog, returning the created row.
    pub async fn create(
        pool: &PgPool,
        venue_id: DbId,
        input: &CreateTrack,
    ) -> Result<Track, sqlx::Error> {
        let query = format!(
            "INSERT INTO tracks (venue_id, title, artist, duration_secs) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Track>(&query)
            .bind(venue_id)
            .bind(&input.title)
            .bind(&input.artist)
            .bind(input.duration_secs)
            .fetch_one(pool)
            .await
    }

    /// Find a track by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Track>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tracks WHERE id = $1");
        sqlx::query_as::<_, Track>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a venue's tracks, optionally including inactive ones.
    ///
    /// Ordered by title, then artist.
    pub async fn list_by_venue(
        pool: &PgPool,
        venue_id: DbId,
        include_inactive: bool,
    ) -> Result<Vec<Track>, sqlx::Error> {
        let query = if include_inactive {
            format!("SELECT {COLUMNS} FROM tracks WHERE venue_id = $1 ORDER BY title, artist")
        } else {
            format!(
                "SELECT {COLUMNS} FROM tracks \
                 WHERE venue_id = $1 AND is_active = true \
                 ORDER BY title, artist"
            )
        };
        sqlx::query_as::<_, Track>(&query)
            .bind(venue_id)
            .fetch_all(pool)
            .await
    }

    /// Update a track. Only non-`None` fields are applied. The owning
    /// venue is immutable.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTrack,
    ) -> Result<Option<Track>, sqlx::Error> {
        let query = format!(
            "UPDATE tracks SET \
                title = COALESCE($2, title), \
                artist = COALESCE($3, artist), \
                duration_secs = COALESCE($4, duration_secs), \
                is_active = COALESCE($5, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Track>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.artist)
            .bind(input.duration_secs)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Deactivate a track (set is_active = false). Returns `true` if a row
    /// changed.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE tracks SET is_active = false WHERE id = $1 AND is_active = true")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
