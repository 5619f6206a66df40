use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use calendar_core::error::CoreError;
use calendar_core::event::EventError;
use serde_json::json;

/// Constraint raised by the `events` overlap trigger.
const OVERLAP_CONSTRAINT: &str = "ex_events_no_overlap";
/// CHECK constraint requiring `end_time > start_time`.
const TIME_ORDER_CONSTRAINT: &str = "ck_events_time_order";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce `{"error": "<message>"}` bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `calendar_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A resource that cannot exist, such as a non-numeric id.
    #[error("{0} not found")]
    NotFound(&'static str),
}

impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        AppError::Core(CoreError::Event(err))
    }
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, core.to_string()),
                CoreError::Event(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
        };

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}

fn internal_error() -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "An internal error occurred".to_string(),
    )
}

/// Classify a sqlx error into an HTTP status and message.
///
/// - `RowNotFound` maps to 404.
/// - The overlap trigger (23P01) and the time-order check (23514) map to the
///   same 400 messages the service produces, for writes that raced past it.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, String) {
    match err {
        sqlx::Error::RowNotFound => (StatusCode::NOT_FOUND, "Resource not found".to_string()),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint();
            match (db_err.code().as_deref(), constraint) {
                // PostgreSQL exclusion_violation
                (Some("23P01"), Some(OVERLAP_CONSTRAINT)) => (
                    StatusCode::BAD_REQUEST,
                    EventError::OverlapDetected.to_string(),
                ),
                // PostgreSQL check_violation
                (Some("23514"), Some(TIME_ORDER_CONSTRAINT)) => (
                    StatusCode::BAD_REQUEST,
                    EventError::EndBeforeStart.to_string(),
                ),
                _ => {
                    tracing::error!(error = %db_err, "Database error");
                    internal_error()
                }
            }
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal_error()
        }
    }
}
