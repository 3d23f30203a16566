//! Patron session entity models and DTOs.
//!
//! A patron session is the stable per-venue patron identity: one row per
//! visit, resolved from the opaque `session_token`. Registered accounts
//! carry an `account_ref`; anonymous table sessions carry only a
//! `table_tag`.

use encore_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `patron_sessions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PatronSession {
    pub id: DbId,
    pub venue_id: DbId,
    pub session_token: String,
    pub account_ref: Option<String>,
    pub table_tag: Option<String>,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for opening a patron session at a venue.
#[derive(Debug, Deserialize, validator::Validate)]
pub struct OpenSession {
    /// Opaque reference to a registered account, if the caller has one.
    #[validate(length(max = 200))]
    pub account_ref: Option<String>,
    /// Free-form table label shown next to the patron's requests.
    #[validate(length(max = 100))]
    pub table_tag: Option<String>,
}
