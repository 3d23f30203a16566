//! Track entity models and DTOs (the per-venue song catalog).

use encore_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `tracks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Track {
    pub id: DbId,
    pub venue_id: DbId,
    pub title: String,
    pub artist: Option<String>,
    pub duration_secs: Option<i32>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a track to a venue's catalog.
#[derive(Debug, Deserialize, validator::Validate)]
pub struct CreateTrack {
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    #[validate(length(max = 300))]
    pub artist: Option<String>,
    #[validate(range(min = 1))]
    pub duration_secs: Option<i32>,
}

/// DTO for updating a track. Only non-`None` fields are applied; the
/// owning venue is immutable.
#[derive(Debug, Deserialize, validator::Validate)]
pub struct UpdateTrack {
    #[validate(length(min = 1, max = 300))]
    pub title: Option<String>,
    #[validate(length(max = 300))]
    pub artist: Option<String>,
    #[validate(range(min = 1))]
    pub duration_secs: Option<i32>,
    pub is_active: Option<bool>,
}
