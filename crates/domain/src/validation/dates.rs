use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::Value;

use super::FormData;

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Point in time a date rule compares against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateReference {
    /// A fixed instant.
    Fixed(NaiveDateTime),
    /// The value of another field in the same form.
    Field(String),
    /// The current UTC time at validation.
    Now,
}

impl DateReference {
    /// References midnight of a calendar day.
    #[must_use]
    pub fn on(date: NaiveDate) -> Self {
        Self::Fixed(date.and_time(NaiveTime::MIN))
    }

    /// References another form field.
    #[must_use]
    pub fn field(field: impl Into<String>) -> Self {
        Self::Field(field.into())
    }

    /// Resolves the reference. Returns `None` when a referenced field is
    /// missing or does not hold a date.
    pub(crate) fn resolve(&self, form: &FormData) -> Option<NaiveDateTime> {
        match self {
            Self::Fixed(value) => Some(*value),
            Self::Field(field) => form.get(field).and_then(Value::as_str).and_then(parse_date),
            Self::Now => Some(Utc::now().naive_utc()),
        }
    }
}

/// Parses the date shapes dashboard forms submit.
///
/// Accepts `YYYY-MM-DD`, local date-times with minute or second precision
/// and RFC 3339 timestamps, which are converted to UTC.
#[must_use]
pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();

    if let Ok(value) = DateTime::parse_from_rfc3339(text) {
        return Some(value.naive_utc());
    }

    if let Some(value) = DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
    {
        return Some(value);
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}
