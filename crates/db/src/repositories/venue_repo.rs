//! Repository for the `venues` table.

use sqlx::PgPool;

use encore_core::types::DbId;

use crate::models::venue::{CreateVenue, UpdateVenue, Venue};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, is_active, max_requests_per_patron, queue_limit, \
                        created_at, updated_at";

/// Provides CRUD operations for venues.
pub struct VenueRepo;

impl VenueRepo {
    /// Insert a new venue, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateVenue) -> Result<Venue, sqlx::Error> {
        let query = format!(
            "INSERT INTO venues (name, slug, max_requests_per_patron, queue_limit) \
             VALUES ($1, $2, COALESCE($3, 2), COALESCE($4, 50)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Venue>(&query)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(input.max_requests_per_patron)
            .bind(input.queue_limit)
            .fetch_one(pool)
            .await
    }

    /// Find a venue by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Venue>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM venues WHERE id = $1");
        sqlx::query_as::<_, Venue>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a venue by its slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Venue>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM venues WHERE slug = $1");
        sqlx::query_as::<_, Venue>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List all venues, optionally including inactive ones. Ordered by name.
    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<Venue>, sqlx::Error> {
        let query = if include_inactive {
            format!("SELECT {COLUMNS} FROM venues ORDER BY name")
        } else {
            format!("SELECT {COLUMNS} FROM venues WHERE is_active = true ORDER BY name")
        };
        sqlx::query_as::<_, Venue>(&query).fetch_all(pool).await
    }

    /// Update a venue. Only non-`None` fields are applied. Slug is immutable.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVenue,
    ) -> Result<Option<Venue>, sqlx::Error> {
        let query = format!(
            "UPDATE venues SET \
                name = COALESCE($2, name), \
                max_requests_per_patron = COALESCE($3, max_requests_per_patron), \
                queue_limit = COALESCE($4, queue_limit), \
                is_active = COALESCE($5, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Venue>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.max_requests_per_patron)
            .bind(input.queue_limit)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Deactivate a venue (set is_active = false). Returns `true` if a row
    /// changed.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE venues SET is_active = false WHERE id = $1 AND is_active = true")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
