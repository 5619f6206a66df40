//! Event operations shared by the HTTP handlers and the seeding tool.
//!
//! Validation always runs before any write. Create and update run the overlap
//! check and the write in one transaction that holds the per-date advisory
//! lock, so two writers on the same date cannot both pass the check.

use calendar_core::error::CoreError;
use calendar_core::event::{EventError, EventInput, ListEventsParams};
use calendar_core::types::DbId;
use calendar_db::models::event::Event;
use calendar_db::repositories::EventRepo;
use calendar_db::DbPool;

use crate::error::AppResult;

const ENTITY: &str = "Event";

#[derive(Clone)]
pub struct EventService {
    pool: DbPool,
}

impl EventService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// List live events matching the query parameters.
    pub async fn list(&self, params: &ListEventsParams) -> AppResult<Vec<Event>> {
        let filter = params.resolve()?;
        let events = EventRepo::list(&self.pool, &filter).await?;
        tracing::debug!(?filter, count = events.len(), "Listed events");
        Ok(events)
    }

    pub async fn get_by_id(&self, id: DbId) -> AppResult<Event> {
        let event = EventRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or(not_found(id))?;
        tracing::debug!(event_id = id, "Fetched event");
        Ok(event)
    }

    pub async fn create(&self, input: EventInput) -> AppResult<Event> {
        let event = input.into_new_event()?;

        let mut tx = self.pool.begin().await?;
        EventRepo::lock_date(&mut *tx, event.event_date).await?;
        if EventRepo::has_overlap(
            &mut *tx,
            event.event_date,
            event.start_time,
            event.end_time,
            None,
        )
        .await?
        {
            return Err(EventError::OverlapDetected.into());
        }
        let created = EventRepo::insert(&mut *tx, &event).await?;
        tx.commit().await?;

        tracing::info!(
            event_id = created.id,
            event_date = %created.event_date,
            "Event created"
        );
        Ok(created)
    }

    /// Replace title, date and times of an existing event.
    ///
    /// An unknown id is reported before the body is validated.
    pub async fn update(&self, id: DbId, input: EventInput) -> AppResult<Event> {
        self.get_by_id(id).await?;
        let event = input.into_new_event()?;

        let mut tx = self.pool.begin().await?;
        EventRepo::lock_date(&mut *tx, event.event_date).await?;
        if EventRepo::has_overlap(
            &mut *tx,
            event.event_date,
            event.start_time,
            event.end_time,
            Some(id),
        )
        .await?
        {
            return Err(EventError::OverlapDetected.into());
        }
        // Deleted between the existence check and here.
        let updated = EventRepo::update(&mut *tx, id, &event)
            .await?
            .ok_or(not_found(id))?;
        tx.commit().await?;

        tracing::info!(
            event_id = id,
            event_date = %updated.event_date,
            "Event updated"
        );
        Ok(updated)
    }

    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        if !EventRepo::soft_delete(&self.pool, id).await? {
            return Err(not_found(id).into());
        }
        tracing::info!(event_id = id, "Event deleted");
        Ok(())
    }
}

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound { entity: ENTITY, id }
}
