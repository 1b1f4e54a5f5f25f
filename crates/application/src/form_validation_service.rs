use std::sync::Arc;

use league_core::AppResult;
use league_domain::{FormData, ValidationResult};
use serde_json::Value;
use tracing::debug;

use crate::{FormCatalog, LeagueForm};

/// Validates submitted league forms before they reach the REST layer.
#[derive(Debug, Clone)]
pub struct FormValidationService {
    catalog: Arc<FormCatalog>,
}

impl FormValidationService {
    /// Creates a service over a prebuilt catalog.
    #[must_use]
    pub fn new(catalog: Arc<FormCatalog>) -> Self {
        Self { catalog }
    }

    /// Creates a service with a freshly built catalog.
    pub fn with_default_catalog() -> AppResult<Self> {
        Ok(Self::new(Arc::new(FormCatalog::new()?)))
    }

    /// Validates a whole form submission.
    ///
    /// Payloads that are not JSON objects carry no fields.
    #[must_use]
    pub fn validate(&self, form: LeagueForm, payload: &Value) -> ValidationResult {
        let result = self
            .catalog
            .validator(form)
            .validate_data(&form_data(payload));

        if !result.is_valid() {
            debug!(
                form = %form,
                failed_fields = result.errors().len(),
                "form submission failed validation"
            );
        }

        result
    }

    /// Validates one field of a form as the user edits it.
    #[must_use]
    pub fn validate_field(
        &self,
        form: LeagueForm,
        field: &str,
        value: Option<&Value>,
        payload: &Value,
    ) -> Option<String> {
        self.catalog
            .validator(form)
            .validate_field_in(field, value, &form_data(payload))
    }
}

fn form_data(payload: &Value) -> FormData {
    payload.as_object().cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::FormValidationService;
    use crate::LeagueForm;

    fn service() -> FormValidationService {
        FormValidationService::with_default_catalog().unwrap_or_else(|error| panic!("{error}"))
    }

    #[test]
    fn non_object_payload_has_no_fields() {
        let result = service().validate(LeagueForm::Playground, &json!(["Main pitch"]));
        assert!(!result.is_valid());
        assert_eq!(
            result.error("name"),
            Some("Playground name is required")
        );
    }

    #[test]
    fn playground_submission_passes() {
        let result = service().validate(
            LeagueForm::Playground,
            &json!({
                "name": "North Field",
                "address": "1 Park Rd",
                "capacity": 22,
                "hourly_rate": "0"
            }),
        );
        assert!(result.is_valid());
    }

    #[test]
    fn field_validation_uses_edited_value_with_form_context() {
        let service = service();
        let payload = json!({"start_date": "2025-06-01", "end_date": "2025-05-01"});

        assert!(
            service
                .validate_field(
                    LeagueForm::Tournament,
                    "end_date",
                    Some(&json!("2025-06-30")),
                    &payload
                )
                .is_none()
        );
        assert_eq!(
            service
                .validate_field(
                    LeagueForm::Tournament,
                    "end_date",
                    payload.get("end_date"),
                    &payload
                )
                .as_deref(),
            Some("End date must be after start date")
        );
    }

    #[test]
    fn unknown_field_always_passes() {
        assert!(
            service()
                .validate_field(LeagueForm::Team, "mascot", None, &json!({}))
                .is_none()
        );
    }
}
