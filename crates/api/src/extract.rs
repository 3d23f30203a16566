//! Patron session extractor (the Session Resolver's inbound half).

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use encore_core::error::CoreError;
use encore_core::types::DbId;
use encore_db::repositories::SessionRepo;

use crate::error::AppError;
use crate::state::AppState;

/// The patron identity resolved from the `x-session-token` header.
///
/// Use this as an extractor parameter in any handler acting on behalf of a
/// patron:
///
/// ```ignore
/// async fn my_handler(patron: Patron) -> AppResult<Json<()>> {
///     tracing::info!(patron_id = patron.patron_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Patron {
    /// The patron's stable identity (the session row id).
    pub patron_id: DbId,
    /// The venue the session is scoped to.
    pub venue_id: DbId,
    /// Display label for the patron's table, if one was given.
    pub table_tag: Option<String>,
}

impl FromRequestParts<AppState> for Patron {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("x-session-token")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing x-session-token header".into(),
                ))
            })?;

        let session = SessionRepo::find_by_token(&state.pool, token)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Invalid, revoked, or expired session token".into(),
                ))
            })?;

        Ok(Patron {
            patron_id: session.id,
            venue_id: session.venue_id,
            table_tag: session.table_tag,
        })
    }
}
