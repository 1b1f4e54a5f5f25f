use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;

use serde::Serialize;
use serde_json::{Map, Value};

use super::Rule;

/// Form values keyed by field name.
pub type FormData = Map<String, Value>;

/// Record types a [`Validator`] can inspect.
pub trait FormRecord {
    /// Returns the record fields as form data.
    fn to_form_data(&self) -> FormData;
}

impl<T: Serialize> FormRecord for T {
    /// Records that do not serialize to a JSON object expose no fields.
    fn to_form_data(&self) -> FormData {
        match serde_json::to_value(self) {
            Ok(Value::Object(fields)) => fields,
            _ => FormData::new(),
        }
    }
}

/// Outcome of validating a whole form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    is_valid: bool,
    errors: BTreeMap<String, String>,
}

impl ValidationResult {
    /// Builds a result from the per-field messages.
    #[must_use]
    pub fn from_errors(errors: BTreeMap<String, String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Returns whether no field failed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Returns the message for each failing field.
    #[must_use]
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Returns the message reported for one field.
    #[must_use]
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Consumes the result, returning the per-field messages.
    #[must_use]
    pub fn into_errors(self) -> BTreeMap<String, String> {
        self.errors
    }
}

/// Ordered rule lists keyed by field name for records of type `T`.
///
/// A validator is immutable once built and keeps no state between calls,
/// so one instance can serve every submission of a form.
pub struct Validator<T> {
    rules: BTreeMap<String, Vec<Rule>>,
    record: PhantomData<fn(&T)>,
}

impl<T> Validator<T> {
    /// Creates a validator without rules.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: BTreeMap::new(),
            record: PhantomData,
        }
    }

    /// Creates a validator from `(field, rules)` pairs.
    pub fn from_rules<I, K>(rules: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<Rule>)>,
        K: Into<String>,
    {
        rules
            .into_iter()
            .fold(Self::new(), |validator, (field, rules)| {
                validator.field(field, rules)
            })
    }

    /// Sets the rules for one field, replacing earlier ones.
    #[must_use]
    pub fn field(
        mut self,
        field: impl Into<String>,
        rules: impl IntoIterator<Item = Rule>,
    ) -> Self {
        self.rules.insert(field.into(), rules.into_iter().collect());
        self
    }

    /// Returns the names of fields with rules.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Returns the rules configured for one field.
    #[must_use]
    pub fn rules_for(&self, field: &str) -> Option<&[Rule]> {
        self.rules.get(field).map(Vec::as_slice)
    }

    /// Validates raw form data.
    #[must_use]
    pub fn validate_data(&self, form: &FormData) -> ValidationResult {
        let errors = self
            .rules
            .iter()
            .filter_map(|(field, rules)| {
                first_failure(rules, form.get(field), form).map(|message| (field.clone(), message))
            })
            .collect();

        ValidationResult::from_errors(errors)
    }

    /// Validates one field value against the given form context.
    ///
    /// Fields without rules always pass.
    #[must_use]
    pub fn validate_field_in(
        &self,
        field: &str,
        value: Option<&Value>,
        form: &FormData,
    ) -> Option<String> {
        self.rules
            .get(field)
            .and_then(|rules| first_failure(rules, value, form))
    }
}

impl<T: FormRecord> Validator<T> {
    /// Validates every field that has rules.
    #[must_use]
    pub fn validate(&self, data: &T) -> ValidationResult {
        self.validate_data(&data.to_form_data())
    }

    /// Validates one field value, optionally with the whole record as
    /// context for cross-field rules.
    ///
    /// The value is taken as given; the record is only consulted by rules
    /// that look at other fields.
    #[must_use]
    pub fn validate_field(
        &self,
        field: &str,
        value: Option<&Value>,
        data: Option<&T>,
    ) -> Option<String> {
        let form = data.map(FormRecord::to_form_data).unwrap_or_default();
        self.validate_field_in(field, value, &form)
    }
}

fn first_failure(rules: &[Rule], value: Option<&Value>, form: &FormData) -> Option<String> {
    rules.iter().find_map(|rule| rule.check(value, form))
}

impl<T> Default for Validator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Validator<T> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
            record: PhantomData,
        }
    }
}

impl<T> Debug for Validator<T> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Validator")
            .field("rules", &self.rules)
            .finish()
    }
}
