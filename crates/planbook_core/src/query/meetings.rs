//! Meeting list view derivation.
//!
//! # Invariants
//! - `Upcoming` and `Past` are strict: a meeting at exactly `now` is in
//!   neither scope.
//! - Explicit dates are ISO calendar dates (`YYYY-MM-DD`) compared in the
//!   timezone of `now`.

use crate::model::meeting::{Meeting, MeetingStatus};
use crate::model::record::Timestamp;
use crate::query::matching::{is_same_day, local_date, SearchNeedle};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const DATE_SCOPE_FORMAT: &str = "%Y-%m-%d";

/// Date window applied to meeting lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateScope {
    /// Same calendar day as now.
    Today,
    /// Strictly after now.
    Upcoming,
    /// Strictly before now.
    Past,
    /// Same calendar day as the given date.
    On(NaiveDate),
}

impl DateScope {
    /// Whether `instant` falls inside this scope relative to `now`.
    pub fn contains<Tz: TimeZone>(&self, instant: &Timestamp, now: &DateTime<Tz>) -> bool {
        match self {
            Self::Today => is_same_day(instant, now),
            Self::Upcoming => *instant > now.with_timezone(&Utc),
            Self::Past => *instant < now.with_timezone(&Utc),
            Self::On(date) => local_date(instant, now) == *date,
        }
    }
}

/// Rejected date scope input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateScopeParseError {
    pub value: String,
}

impl Display for DateScopeParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid date scope `{}`; expected today|upcoming|past|YYYY-MM-DD",
            self.value
        )
    }
}

impl Error for DateScopeParseError {}

impl FromStr for DateScope {
    type Err = DateScopeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "today" => Ok(Self::Today),
            "upcoming" => Ok(Self::Upcoming),
            "past" => Ok(Self::Past),
            _ => NaiveDate::parse_from_str(trimmed, DATE_SCOPE_FORMAT)
                .map(Self::On)
                .map_err(|_| DateScopeParseError {
                    value: s.to_string(),
                }),
        }
    }
}

impl Display for DateScope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Today => f.write_str("today"),
            Self::Upcoming => f.write_str("upcoming"),
            Self::Past => f.write_str("past"),
            Self::On(date) => write!(f, "{}", date.format(DATE_SCOPE_FORMAT)),
        }
    }
}

/// Meeting list filter. `Default` applies no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeetingFilter {
    /// Matched against title, agenda and participants, case-insensitive.
    pub search_text: Option<String>,
    pub status: Option<MeetingStatus>,
    pub date_scope: Option<DateScope>,
}

impl MeetingFilter {
    /// Returns whether any constraint is set.
    pub fn is_active(&self) -> bool {
        self.search_text.as_deref().is_some_and(|text| !text.is_empty())
            || self.status.is_some()
            || self.date_scope.is_some()
    }
}

/// Filters meetings and orders them earliest first.
pub fn filter_meetings<'a, Tz: TimeZone>(
    meetings: &'a [Meeting],
    filter: &MeetingFilter,
    now: &DateTime<Tz>,
) -> Vec<&'a Meeting> {
    let needle = SearchNeedle::parse(filter.search_text.as_deref());
    let mut view: Vec<&Meeting> = meetings
        .iter()
        .filter(|meeting| {
            needle.as_ref().map_or(true, |needle| {
                needle.matches(&meeting.title)
                    || needle.matches_opt(meeting.agenda.as_deref())
                    || needle.matches_any(&meeting.participants)
            })
        })
        .filter(|meeting| filter.status.map_or(true, |s| meeting.status == s))
        .filter(|meeting| {
            filter
                .date_scope
                .map_or(true, |scope| scope.contains(&meeting.datetime, now))
        })
        .collect();
    view.sort_by(|a, b| compare_meetings(a, b));
    view
}

/// Meeting list ordering: `datetime` ascending.
pub fn compare_meetings(a: &Meeting, b: &Meeting) -> Ordering {
    a.datetime.cmp(&b.datetime)
}
