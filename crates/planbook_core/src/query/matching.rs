//! Shared matching helpers for the query engine.

use crate::model::record::Timestamp;
use chrono::{DateTime, NaiveDate, TimeZone};

/// Lowercased search needle; absent when the search text is empty.
pub(crate) struct SearchNeedle(String);

impl SearchNeedle {
    pub(crate) fn parse(search_text: Option<&str>) -> Option<Self> {
        match search_text {
            Some(text) if !text.is_empty() => Some(Self(text.to_lowercase())),
            _ => None,
        }
    }

    /// Case-insensitive substring match.
    pub(crate) fn matches(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.0)
    }

    pub(crate) fn matches_opt(&self, haystack: Option<&str>) -> bool {
        haystack.is_some_and(|text| self.matches(text))
    }

    pub(crate) fn matches_any(&self, values: &[String]) -> bool {
        values.iter().any(|value| self.matches(value))
    }
}

/// Calendar date of `instant` as seen in `now`'s timezone.
pub(crate) fn local_date<Tz: TimeZone>(instant: &Timestamp, now: &DateTime<Tz>) -> NaiveDate {
    instant.with_timezone(&now.timezone()).date_naive()
}

/// Whether `instant` falls on the same calendar day as `now`.
pub(crate) fn is_same_day<Tz: TimeZone>(instant: &Timestamp, now: &DateTime<Tz>) -> bool {
    local_date(instant, now) == now.date_naive()
}
