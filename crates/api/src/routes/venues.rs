//! Route definitions for the venue-scoped resources.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{queue, requests, sessions, tracks, venues};
use crate::state::AppState;

/// Routes for venues, their catalogs, sessions, and queue views.
///
/// ```text
/// GET    /venues                      -> list_venues
/// POST   /venues                      -> create_venue
/// GET    /venues/{id}                 -> get_venue
/// PUT    /venues/{id}                 -> update_venue
/// DELETE /venues/{id}                 -> deactivate_venue
/// GET    /venues/{id}/tracks          -> list_tracks
/// POST   /venues/{id}/tracks          -> create_track
/// POST   /venues/{id}/sessions        -> open_session
/// GET    /venues/{id}/queue           -> get_queue
/// POST   /venues/{id}/requests        -> submit_request
/// GET    /venues/{id}/requests/mine   -> list_my_requests
/// PUT    /tracks/{id}                 -> update_track
/// DELETE /tracks/{id}                 -> deactivate_track
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/venues", get(venues::list_venues).post(venues::create_venue))
        .route(
            "/venues/{id}",
            get(venues::get_venue)
                .put(venues::update_venue)
                .delete(venues::deactivate_venue),
        )
        .route(
            "/venues/{id}/tracks",
            get(tracks::list_tracks).post(tracks::create_track),
        )
        .route("/venues/{id}/sessions", post(sessions::open_session))
        .route("/venues/{id}/queue", get(queue::get_queue))
        .route("/venues/{id}/requests", post(requests::submit_request))
        .route("/venues/{id}/requests/mine", get(requests::list_my_requests))
        .route(
            "/tracks/{id}",
            put(tracks::update_track).delete(tracks::deactivate_track),
        )
}
