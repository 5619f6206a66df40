//! Resolution of `GET /events` query parameters into a list filter.

use chrono::{Months, NaiveDate};

use super::{parse_date, EventError};

/// Raw list query parameters. Empty values are treated as absent.
#[derive(Debug, Clone, Default)]
pub struct ListEventsParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub keyword: Option<String>,
    pub sort_order: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// `desc` in any case selects descending; anything else is ascending.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if value.eq_ignore_ascii_case("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A resolved list filter. Date bounds are inclusive; all criteria are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventListFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    /// Case-sensitive substring of the title.
    pub keyword: Option<String>,
    pub sort_order: SortOrder,
}

impl ListEventsParams {
    /// Collect parameters from decoded query pairs.
    ///
    /// The first occurrence of a repeated key wins; unknown keys are ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "start_date" => &mut params.start_date,
                "end_date" => &mut params.end_date,
                "keyword" => &mut params.keyword,
                "sort_order" => &mut params.sort_order,
                "year" => &mut params.year,
                "month" => &mut params.month,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }

    /// Validate the parameters and resolve the effective date range.
    ///
    /// `year` with `month` replaces any explicit range with that calendar
    /// month; `year` alone replaces it with the whole year. `month` is only
    /// read when `year` is present.
    pub fn resolve(&self) -> Result<EventListFilter, EventError> {
        let mut from = non_empty(&self.start_date)
            .map(|raw| parse_date(raw).ok_or(EventError::InvalidStartDate))
            .transpose()?;
        let mut to = non_empty(&self.end_date)
            .map(|raw| parse_date(raw).ok_or(EventError::InvalidEndDate))
            .transpose()?;

        if let Some(year) = non_empty(&self.year).map(parse_year).transpose()? {
            let (first, last) = match non_empty(&self.month) {
                Some(raw) => {
                    calendar_month(year, parse_month(raw)?).ok_or(EventError::InvalidMonth)?
                }
                None => calendar_year(year).ok_or(EventError::InvalidYear)?,
            };
            from = Some(first);
            to = Some(last);
        }

        Ok(EventListFilter {
            from,
            to,
            keyword: non_empty(&self.keyword).map(str::to_string),
            sort_order: SortOrder::parse(non_empty(&self.sort_order)),
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// A year must be exactly four ASCII digits.
fn parse_year(raw: &str) -> Result<i32, EventError> {
    if raw.len() != 4 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EventError::InvalidYear);
    }
    raw.parse().map_err(|_| EventError::InvalidYear)
}

/// A month must be exactly two ASCII digits in `01..=12`.
fn parse_month(raw: &str) -> Result<u32, EventError> {
    if raw.len() != 2 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EventError::InvalidMonth);
    }
    match raw.parse::<u32>() {
        Ok(month @ 1..=12) => Ok(month),
        _ => Err(EventError::InvalidMonth),
    }
}

/// First and last day of a calendar month.
fn calendar_month(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
    Some((first, last))
}

/// First and last day of a calendar year.
fn calendar_year(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    Some((
        NaiveDate::from_ymd_opt(year, 1, 1)?,
        NaiveDate::from_ymd_opt(year, 12, 31)?,
    ))
}
