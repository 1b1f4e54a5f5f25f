//! Rule factories.
//!
//! Every factory returns a [`Rule`] with an English default message that
//! can be replaced with [`Rule::with_message`]. A missing key and JSON
//! `null` are both treated as an absent value.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

use super::{DateReference, FormData, parse_date};

type Predicate = dyn Fn(Option<&Value>, &FormData) -> bool + Send + Sync;

/// Single validation rule: a predicate over one field value plus the
/// message reported when the predicate does not hold.
#[derive(Clone)]
pub struct Rule {
    message: String,
    predicate: Arc<Predicate>,
}

impl Rule {
    /// Creates a rule from a predicate that returns `true` for valid values.
    ///
    /// The predicate receives the field value and the whole form, so it can
    /// reach any other field.
    pub fn new<F>(message: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(Option<&Value>, &FormData) -> bool + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Replaces the message reported on failure.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Returns the message reported on failure.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Checks a value, returning the failure message or `None` when valid.
    #[must_use]
    pub fn check(&self, value: Option<&Value>, form: &FormData) -> Option<String> {
        let value = value.filter(|value| !value.is_null());
        if (self.predicate)(value, form) {
            None
        } else {
            Some(self.message.clone())
        }
    }
}

impl Debug for Rule {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Rule")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

enum Presence<'a> {
    Absent,
    Text(&'a str),
    Other,
}

fn presence(value: Option<&Value>) -> Presence<'_> {
    match value {
        None => Presence::Absent,
        Some(Value::String(text)) if text.is_empty() => Presence::Absent,
        Some(Value::String(text)) => Presence::Text(text.as_str()),
        Some(_) => Presence::Other,
    }
}

fn text_rule<F>(message: String, matches: F) -> Rule
where
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    Rule::new(message, move |value, _| match presence(value) {
        Presence::Absent => true,
        Presence::Text(text) => matches(text),
        Presence::Other => false,
    })
}

fn length_of(value: &Value) -> Option<usize> {
    match value {
        Value::String(text) => Some(text.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn array_len(value: Option<&Value>) -> usize {
    value.and_then(Value::as_array).map_or(0, Vec::len)
}

/// Fails for absent values, blank strings and empty arrays.
#[must_use]
pub fn required() -> Rule {
    Rule::new("This field is required", |value, _| match value {
        None => false,
        Some(Value::String(text)) => !text.trim().is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    })
}

/// Fails when a string or array is shorter than `length`. Absent values fail.
#[must_use]
pub fn min_length(length: usize) -> Rule {
    Rule::new(
        format!("Must be at least {length} characters"),
        move |value, _| value.is_some_and(|value| length_of(value).is_none_or(|len| len >= length)),
    )
}

/// Fails when a string or array is longer than `length`. Absent values pass.
#[must_use]
pub fn max_length(length: usize) -> Rule {
    Rule::new(
        format!("Must be at most {length} characters"),
        move |value, _| value.is_none_or(|value| length_of(value).is_none_or(|len| len <= length)),
    )
}

/// Fails when a present value is not shaped like `local@domain.tld`.
#[must_use]
pub fn email() -> Rule {
    text_rule("Invalid email address".to_owned(), is_email)
}

fn is_email(text: &str) -> bool {
    if text.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = text.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain
            .char_indices()
            .any(|(index, character)| character == '.' && index > 0 && index + 1 < domain.len())
}

/// Fails when a present value is not `+` followed by 10 to 15 digits.
#[must_use]
pub fn phone() -> Rule {
    text_rule("Invalid phone number".to_owned(), |text| {
        text.strip_prefix('+').is_some_and(|digits| {
            (10..=15).contains(&digits.len()) && digits.bytes().all(|byte| byte.is_ascii_digit())
        })
    })
}

/// Fails when a present numeric value is below `bound`. Absent values pass.
#[must_use]
pub fn min(bound: f64) -> Rule {
    numeric_rule(format!("Must be at least {bound}"), move |number| {
        number >= bound
    })
}

/// Fails when a present numeric value is above `bound`. Absent values pass.
#[must_use]
pub fn max(bound: f64) -> Rule {
    numeric_rule(format!("Must be at most {bound}"), move |number| {
        number <= bound
    })
}

fn numeric_rule<F>(message: String, within: F) -> Rule
where
    F: Fn(f64) -> bool + Send + Sync + 'static,
{
    Rule::new(message, move |value, _| match presence(value) {
        Presence::Absent => true,
        Presence::Text(_) | Presence::Other => value
            .and_then(numeric_value)
            .is_some_and(&within),
    })
}

/// Fails when a present value does not match `regex`.
#[must_use]
pub fn pattern(regex: Regex) -> Rule {
    text_rule("Invalid format".to_owned(), move |text| regex.is_match(text))
}

/// Fails when `predicate` returns `false`.
///
/// The predicate sees the whole form, which makes this the hook for
/// cross-field rules.
pub fn custom<F>(predicate: F, message: impl Into<String>) -> Rule
where
    F: Fn(Option<&Value>, &FormData) -> bool + Send + Sync + 'static,
{
    Rule::new(message, predicate)
}

/// Fails when an array holds fewer than `length` items. Absent values count
/// as empty.
#[must_use]
pub fn array_min_length(length: usize) -> Rule {
    Rule::new(
        format!("Select at least {length} items"),
        move |value, _| array_len(value) >= length,
    )
}

/// Fails when an array holds more than `length` items.
#[must_use]
pub fn array_max_length(length: usize) -> Rule {
    Rule::new(
        format!("Select at most {length} items"),
        move |value, _| array_len(value) <= length,
    )
}

/// Fails when a present value is not a recognized date or date-time.
#[must_use]
pub fn date() -> Rule {
    text_rule("Invalid date".to_owned(), |text| parse_date(text).is_some())
}

/// Fails unless a present date is strictly after the reference.
#[must_use]
pub fn date_after(reference: DateReference) -> Rule {
    date_rule("Date must be after the reference date", reference, |date, bound| {
        date > bound
    })
}

/// Fails unless a present date is strictly before the reference.
#[must_use]
pub fn date_before(reference: DateReference) -> Rule {
    date_rule("Date must be before the reference date", reference, |date, bound| {
        date < bound
    })
}

fn date_rule<F>(message: &str, reference: DateReference, ordered: F) -> Rule
where
    F: Fn(chrono::NaiveDateTime, chrono::NaiveDateTime) -> bool + Send + Sync + 'static,
{
    Rule::new(message, move |value, form| match presence(value) {
        Presence::Absent => true,
        Presence::Other => false,
        Presence::Text(text) => parse_date(text).is_some_and(|date| {
            reference
                .resolve(form)
                .is_none_or(|bound| ordered(date, bound))
        }),
    })
}
