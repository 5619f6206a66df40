//! Handlers for the `/events` resource.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use calendar_core::event::{EventInput, ListEventsParams};
use calendar_core::types::DbId;
use calendar_db::models::event::Event;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Confirmation body for operations that return no entity.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// A non-numeric id can never name an event.
fn event_id(path: Result<Path<DbId>, PathRejection>) -> AppResult<DbId> {
    path.map(|Path(id)| id)
        .map_err(|_| AppError::NotFound("Event"))
}

fn bad_json(rejection: JsonRejection) -> AppError {
    AppError::BadRequest(rejection.body_text())
}

/// GET /api/events
///
/// Query pairs are collected raw so a repeated key keeps its first value.
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> AppResult<Json<Vec<Event>>> {
    let Query(pairs) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let params = ListEventsParams::from_pairs(pairs);
    let events = state.events.list(&params).await?;
    Ok(Json(events))
}

/// GET /api/events/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<Event>> {
    let event = state.events.get_by_id(event_id(id)?).await?;
    Ok(Json(event))
}

/// POST /api/events
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<EventInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Event>)> {
    let Json(input) = body.map_err(bad_json)?;
    let event = state.events.create(input).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// PUT /api/events/{id}
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
    body: Result<Json<EventInput>, JsonRejection>,
) -> AppResult<Json<Event>> {
    let id = event_id(id)?;
    let input = match body {
        Ok(Json(input)) => input,
        Err(rejection) => {
            // Unknown ids win over unreadable bodies.
            state.events.get_by_id(id).await?;
            return Err(bad_json(rejection));
        }
    };
    let event = state.events.update(id, input).await?;
    Ok(Json(event))
}

/// DELETE /api/events/{id}
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<MessageResponse>> {
    state.events.delete(event_id(id)?).await?;
    Ok(Json(MessageResponse {
        message: "Event deleted successfully",
    }))
}
