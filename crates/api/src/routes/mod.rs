pub mod event;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree, mounted under the configured prefix.
///
/// ```text
/// /events          list, create
/// /events/{id}     get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/events", event::router())
}
