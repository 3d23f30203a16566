pub mod health;
pub mod requests;
pub mod venues;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /venues                          list, create
/// /venues/{id}                     get, update, deactivate
/// /venues/{id}/tracks              list, create
/// /venues/{id}/sessions            open patron session
/// /venues/{id}/queue               pending queue view
/// /venues/{id}/requests            submit (patron session required)
/// /venues/{id}/requests/mine       patron history
///
/// /tracks/{id}                     update, deactivate
///
/// /requests/{id}                   get
/// /requests/{id}/transition        staff state change
/// /requests/{id}/cancel            patron cancel
///
/// /sessions/current                revoke own session
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(venues::router())
        .merge(requests::router())
}
