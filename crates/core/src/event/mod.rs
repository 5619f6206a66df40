//! Event input validation and scheduling rules.
//!
//! Raw request values are parsed exactly once here into [`NewEvent`]; every
//! layer above works with `NaiveDate` and [`EventTime`] rather than strings.

mod filter;
mod time;

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

pub use filter::{EventListFilter, ListEventsParams, SortOrder};
pub use time::{EventTime, ParseEventTimeError};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Wire and storage format of `event_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// First key of the two-key advisory lock taken per `event_date` while an
/// overlap check and its write run. The second key is the number of days
/// since 2000-01-01. The `events` overlap trigger uses the same namespace.
pub const EVENT_DATE_LOCK_NAMESPACE: i32 = 7_204_113;

/// Fields checked for presence, with the labels used in error messages.
const REQUIRED_FIELDS: &[(&str, &str)] = &[
    ("title", "Title"),
    ("event_date", "EventDate"),
    ("start_time", "StartTime"),
    ("end_time", "EndTime"),
];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventError {
    /// One or more required fields are absent or empty. Holds field labels.
    #[error("{}", required_message(.0))]
    MissingRequired(Vec<&'static str>),

    #[error("Invalid event date format")]
    InvalidDate,

    #[error("Invalid start time format")]
    InvalidStartTime,

    #[error("Invalid end time format")]
    InvalidEndTime,

    #[error("End time must be after start time")]
    EndBeforeStart,

    #[error("Event time is overlapping with existing events")]
    OverlapDetected,

    #[error("Invalid start date")]
    InvalidStartDate,

    #[error("Invalid end date")]
    InvalidEndDate,

    #[error("Invalid year")]
    InvalidYear,

    #[error("Invalid month")]
    InvalidMonth,
}

fn required_message(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|field| {
            format!("Key: 'Event.{field}' Error:Field validation for '{field}' failed on the 'required' tag")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Request body for creating or replacing an event.
///
/// Every field is optional at the serde level so that a missing field is
/// reported as a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct EventInput {
    #[validate(required, length(min = 1, code = "required"))]
    pub title: Option<String>,
    #[validate(required, length(min = 1, code = "required"))]
    pub event_date: Option<String>,
    #[validate(required, length(min = 1, code = "required"))]
    pub start_time: Option<String>,
    #[validate(required, length(min = 1, code = "required"))]
    pub end_time: Option<String>,
}

/// A fully validated event ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub event_date: NaiveDate,
    pub start_time: EventTime,
    pub end_time: EventTime,
}

impl EventInput {
    /// Check required fields, then times, then the date.
    ///
    /// Overlap is not checked here; it needs the store.
    pub fn into_new_event(self) -> Result<NewEvent, EventError> {
        if let Err(errors) = self.validate() {
            let field_errors = errors.field_errors();
            let missing = REQUIRED_FIELDS
                .iter()
                .filter(|(field, _)| field_errors.keys().any(|key| &**key == *field))
                .map(|(_, label)| *label)
                .collect();
            return Err(EventError::MissingRequired(missing));
        }

        let title = self.title.unwrap_or_default();
        let event_date = self.event_date.unwrap_or_default();
        let start_time = self.start_time.unwrap_or_default();
        let end_time = self.end_time.unwrap_or_default();

        let (start_time, end_time) = validate_times(&start_time, &end_time)?;
        let event_date = validate_date(&event_date)?;

        Ok(NewEvent {
            title,
            event_date,
            start_time,
            end_time,
        })
    }
}

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

/// Parse both times and require `end` to be strictly after `start`.
pub fn validate_times(start: &str, end: &str) -> Result<(EventTime, EventTime), EventError> {
    let start: EventTime = start.parse().map_err(|_| EventError::InvalidStartTime)?;
    let end: EventTime = end.parse().map_err(|_| EventError::InvalidEndTime)?;
    if end <= start {
        return Err(EventError::EndBeforeStart);
    }
    Ok((start, end))
}

/// Parse an event date in strict `YYYY-MM-DD` form.
pub fn validate_date(date: &str) -> Result<NaiveDate, EventError> {
    parse_date(date).ok_or(EventError::InvalidDate)
}

/// Strict `YYYY-MM-DD` parser: four-digit year, two-digit month and day.
///
/// chrono alone accepts single-digit months and signed years.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let bytes = raw.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shape_ok {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn input(title: &str, date: &str, start: &str, end: &str) -> EventInput {
        EventInput {
            title: Some(title.to_string()),
            event_date: Some(date.to_string()),
            start_time: Some(start.to_string()),
            end_time: Some(end.to_string()),
        }
    }

    #[test]
    fn valid_input_is_parsed() {
        let event = input("Standup", "4000-05-15", "15:00:00+07", "16:00:00+07")
            .into_new_event()
            .unwrap();
        assert_eq!(event.title, "Standup");
        assert_eq!(event.event_date, NaiveDate::from_ymd_opt(4000, 5, 15).unwrap());
        assert_eq!(event.start_time.to_string(), "15:00:00+07");
        assert_eq!(event.end_time.to_string(), "16:00:00+07");
    }

    #[test]
    fn missing_title_names_the_field() {
        let mut raw = input("", "4000-05-12", "15:00:00-07", "16:00:00-07");
        raw.title = None;
        let err = raw.into_new_event().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Key: 'Event.Title' Error:Field validation for 'Title' failed on the 'required' tag"
        );
    }

    #[test]
    fn empty_title_counts_as_missing() {
        let err = input("", "4000-05-12", "15:00:00-07", "16:00:00-07")
            .into_new_event()
            .unwrap_err();
        assert_eq!(err, EventError::MissingRequired(vec!["Title"]));
    }

    #[test]
    fn every_missing_field_is_reported_in_order() {
        let err = EventInput::default().into_new_event().unwrap_err();
        assert_eq!(
            err,
            EventError::MissingRequired(vec!["Title", "EventDate", "StartTime", "EndTime"])
        );
        assert_eq!(err.to_string().lines().count(), 4);
    }

    #[test]
    fn required_check_runs_before_format_checks() {
        let mut raw = input("", "4000-05-12", "15:00:00-07", "1s6:00:00-07");
        raw.title = None;
        assert_matches!(raw.into_new_event(), Err(EventError::MissingRequired(_)));
    }

    #[test]
    fn end_before_start_is_rejected() {
        let err = input("T", "4000-05-15", "16:00:00+07", "15:00:00+07")
            .into_new_event()
            .unwrap_err();
        assert_eq!(err.to_string(), "End time must be after start time");
    }

    #[test]
    fn equal_start_and_end_is_rejected() {
        assert_eq!(
            validate_times("10:00:00+00", "10:00:00+00"),
            Err(EventError::EndBeforeStart)
        );
    }

    #[test]
    fn time_errors_take_precedence_over_date_errors() {
        let err = input("T", "4000-05-35", "1a5:00:00-07", "16:00:00-07")
            .into_new_event()
            .unwrap_err();
        assert_eq!(err, EventError::InvalidStartTime);

        let err = input("T", "4000-05-35", "15:00:00-07", "1s6:00:00-07")
            .into_new_event()
            .unwrap_err();
        assert_eq!(err, EventError::InvalidEndTime);
    }

    #[test]
    fn impossible_day_is_invalid_date() {
        let err = input("T", "4000-05-35", "15:00:00-07", "16:00:00-07")
            .into_new_event()
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid event date format");
    }

    #[test]
    fn parse_date_is_strict() {
        assert!(parse_date("2030-01-01").is_some());
        assert!(parse_date("2024-02-29").is_some());
        for raw in [
            "2023-02-29",
            "2030-1-01",
            "2030-01-1",
            "30-01-01",
            "+2030-01-01",
            "2030/01/01",
            "2030-13-01",
            "2030-00-10",
            "2030-01-01T00:00:00Z",
            "",
        ] {
            assert!(parse_date(raw).is_none(), "{raw:?} should not parse");
        }
    }
}
