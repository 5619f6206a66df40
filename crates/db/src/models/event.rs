//! Event entity model.

use calendar_core::event::EventTime;
use calendar_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// A live (not soft-deleted) row from the `events` table.
///
/// `start_time` / `end_time` are selected as text (`HH:MM:SS±HH`) and parsed
/// on decode, so a row that does not fit the wire format fails loudly.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub title: String,
    pub event_date: NaiveDate,
    #[sqlx(try_from = "String")]
    pub start_time: EventTime,
    #[sqlx(try_from = "String")]
    pub end_time: EventTime,
    #[serde(skip)]
    pub created_at: Timestamp,
    #[serde(skip)]
    pub updated_at: Timestamp,
}
