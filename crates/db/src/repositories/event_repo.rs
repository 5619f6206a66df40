//! Repository for the `events` table.
//!
//! Every query filters on `deleted_at IS NULL`; soft-deleted rows are never
//! returned, counted as overlapping, updated or deleted again.

use calendar_core::event::{EventListFilter, EventTime, NewEvent, EVENT_DATE_LOCK_NAMESPACE};
use calendar_core::types::DbId;
use chrono::NaiveDate;
use sqlx::postgres::PgExecutor;
use sqlx::PgPool;

use crate::models::event::Event;

/// Column list shared across queries. Times are rendered as text so they
/// decode through [`EventTime`].
const COLUMNS: &str = "id, title, event_date, \
     start_time::TEXT AS start_time, end_time::TEXT AS end_time, \
     created_at, updated_at";

/// Provides CRUD operations for events.
pub struct EventRepo;

impl EventRepo {
    /// Find a live event by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List live events matching every criterion in `filter`.
    ///
    /// Ordered by `event_date` then `start_time` (then `id`), all in the
    /// filter's direction.
    pub async fn list(pool: &PgPool, filter: &EventListFilter) -> Result<Vec<Event>, sqlx::Error> {
        let dir = filter.sort_order.as_sql();
        let query = format!(
            "SELECT {COLUMNS} FROM events
             WHERE deleted_at IS NULL
               AND ($1::DATE IS NULL OR event_date >= $1)
               AND ($2::DATE IS NULL OR event_date <= $2)
               AND ($3::TEXT IS NULL OR strpos(title, $3) > 0)
             ORDER BY event_date {dir}, start_time {dir}, id {dir}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(filter.from)
            .bind(filter.to)
            .bind(filter.keyword.as_deref())
            .fetch_all(pool)
            .await
    }

    /// Take the per-date write lock held until the surrounding transaction ends.
    ///
    /// Must run inside a transaction; in autocommit mode it is released
    /// immediately. The overlap trigger takes the same lock.
    pub async fn lock_date<'e>(
        executor: impl PgExecutor<'e>,
        event_date: NaiveDate,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT pg_advisory_xact_lock($1, $2::DATE - DATE '2000-01-01')")
            .bind(EVENT_DATE_LOCK_NAMESPACE)
            .bind(event_date)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Whether a live event on `event_date` intersects `[start_time, end_time)`.
    ///
    /// `exclude_id` skips one row (the event being updated). Read-only.
    pub async fn has_overlap<'e>(
        executor: impl PgExecutor<'e>,
        event_date: NaiveDate,
        start_time: EventTime,
        end_time: EventTime,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (
                SELECT 1 FROM events
                WHERE event_date = $1
                  AND start_time < $2::TIMETZ
                  AND end_time > $3::TIMETZ
                  AND deleted_at IS NULL
                  AND ($4::BIGINT IS NULL OR id <> $4)
             )",
        )
        .bind(event_date)
        .bind(end_time.to_string())
        .bind(start_time.to_string())
        .bind(exclude_id)
        .fetch_one(executor)
        .await
    }

    /// Insert a new event, returning the created row.
    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        input: &NewEvent,
    ) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events (title, event_date, start_time, end_time)
             VALUES ($1, $2, $3::TIMETZ, $4::TIMETZ)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(&input.title)
            .bind(input.event_date)
            .bind(input.start_time.to_string())
            .bind(input.end_time.to_string())
            .fetch_one(executor)
            .await
    }

    /// Overwrite title, date and times of a live event.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        input: &NewEvent,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET
                title = $2,
                event_date = $3,
                start_time = $4::TIMETZ,
                end_time = $5::TIMETZ
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.event_date)
            .bind(input.start_time.to_string())
            .bind(input.end_time.to_string())
            .fetch_optional(executor)
            .await
    }

    /// Soft-delete an event by ID. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE events SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
