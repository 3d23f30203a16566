//! Route definitions for the `/requests` and `/sessions` resources.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{requests, sessions};
use crate::state::AppState;

/// Routes mounted at `/requests` and `/sessions`.
///
/// ```text
/// GET    /requests/{id}              -> get_request
/// POST   /requests/{id}/transition   -> transition_request (staff)
/// POST   /requests/{id}/cancel       -> cancel_request (patron)
/// DELETE /sessions/current           -> close_session
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/requests/{id}", get(requests::get_request))
        .route("/requests/{id}/transition", post(requests::transition_request))
        .route("/requests/{id}/cancel", post(requests::cancel_request))
        .route("/sessions/current", delete(sessions::close_session))
}
