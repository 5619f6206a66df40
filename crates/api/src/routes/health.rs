use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// GET /healthcheck -- liveness check, plain-text `ok`.
async fn healthcheck() -> &'static str {
    "ok"
}

/// Mount health check routes (root level, never under the API prefix).
pub fn router() -> Router<AppState> {
    Router::new().route("/healthcheck", get(healthcheck))
}
