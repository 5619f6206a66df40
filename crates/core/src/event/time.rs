//! Time-of-day with a whole-hour UTC offset (`HH:MM:SS±HH`).

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{FixedOffset, NaiveTime, Timelike};
use serde::{Serialize, Serializer};

/// Largest accepted offset magnitude in hours (PostgreSQL `TIMETZ` limit).
const MAX_OFFSET_HOURS: u32 = 15;

/// Wire length of `HH:MM:SS±HH`.
const WIRE_LEN: usize = 11;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time-with-offset '{0}', expected HH:MM:SS±HH")]
pub struct ParseEventTimeError(pub String);

/// A start or end time of an event.
///
/// Ordering follows PostgreSQL `TIMETZ`: both values are normalised to UTC
/// without wrapping around midnight, ties are broken by the offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventTime {
    time: NaiveTime,
    offset: FixedOffset,
}

impl EventTime {
    /// Build from a wall-clock time and a whole-hour offset east of UTC.
    ///
    /// Returns `None` if the offset exceeds 15 hours either way.
    pub fn new(time: NaiveTime, offset_hours: i32) -> Option<Self> {
        if offset_hours.unsigned_abs() > MAX_OFFSET_HOURS {
            return None;
        }
        let offset = FixedOffset::east_opt(offset_hours * 3600)?;
        // Sub-second precision is not representable on the wire.
        let time = time.with_nanosecond(0)?;
        Some(Self { time, offset })
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn offset_hours(&self) -> i32 {
        self.offset.local_minus_utc() / 3600
    }

    /// Seconds since UTC midnight. May be negative or exceed one day.
    fn utc_seconds(&self) -> i64 {
        i64::from(self.time.num_seconds_from_midnight())
            - i64::from(self.offset.local_minus_utc())
    }
}

impl Ord for EventTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.utc_seconds()
            .cmp(&other.utc_seconds())
            // PostgreSQL stores zones as seconds west of UTC and compares those.
            .then_with(|| {
                other
                    .offset
                    .local_minus_utc()
                    .cmp(&self.offset.local_minus_utc())
            })
    }
}

impl PartialOrd for EventTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for EventTime {
    type Err = ParseEventTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseEventTimeError(s.to_string());

        let bytes = s.as_bytes();
        if bytes.len() != WIRE_LEN || bytes[2] != b':' || bytes[5] != b':' {
            return Err(err());
        }

        let hour = two_digits(&bytes[0..2]).ok_or_else(err)?;
        let minute = two_digits(&bytes[3..5]).ok_or_else(err)?;
        let second = two_digits(&bytes[6..8]).ok_or_else(err)?;
        let time = NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(err)?;

        let sign = match bytes[8] {
            b'+' => 1,
            b'-' => -1,
            _ => return Err(err()),
        };
        let offset_hours = two_digits(&bytes[9..11]).ok_or_else(err)?;

        EventTime::new(time, sign * offset_hours as i32).ok_or_else(err)
    }
}

impl TryFrom<String> for EventTime {
    type Error = ParseEventTimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.offset_hours();
        let sign = if hours < 0 { '-' } else { '+' };
        write!(
            f,
            "{}{sign}{:02}",
            self.time.format("%H:%M:%S"),
            hours.unsigned_abs()
        )
    }
}

impl Serialize for EventTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse exactly two ASCII digits.
fn two_digits(bytes: &[u8]) -> Option<u32> {
    match bytes {
        [a, b] if a.is_ascii_digit() && b.is_ascii_digit() => {
            Some(u32::from(a - b'0') * 10 + u32::from(b - b'0'))
        }
        _ => None,
    }
}
