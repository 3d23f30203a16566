//! Venue entity models and DTOs.

use encore_core::queue::AdmissionLimits;
use encore_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `venues` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Venue {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub is_active: bool,
    pub max_requests_per_patron: i16,
    pub queue_limit: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Venue {
    /// The venue's admission caps as the core rule input.
    pub fn admission_limits(&self) -> AdmissionLimits {
        AdmissionLimits {
            max_requests_per_patron: self.max_requests_per_patron,
            queue_limit: self.queue_limit,
        }
    }
}

/// DTO for creating a venue.
#[derive(Debug, Deserialize, validator::Validate)]
pub struct CreateVenue {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub slug: String,
    #[validate(range(min = 1, max = 10))]
    pub max_requests_per_patron: Option<i16>,
    #[validate(range(min = 1, max = 200))]
    pub queue_limit: Option<i32>,
}

/// DTO for updating a venue. Only non-`None` fields are applied; the slug
/// is immutable.
#[derive(Debug, Deserialize, validator::Validate)]
pub struct UpdateVenue {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(range(min = 1, max = 10))]
    pub max_requests_per_patron: Option<i16>,
    #[validate(range(min = 1, max = 200))]
    pub queue_limit: Option<i32>,
    pub is_active: Option<bool>,
}
