//! Submit-time validation shared by the form view-models

use contracts::shared::validation::{FormState, ValidationEngine, ValidationErrors, ValidationRule};
use leptos::prelude::*;

/// Run `rules` on save. Fills `errors` with every failing field and returns
/// `false` when the submitter must not be called.
pub fn validate_for_submit(
    state: anyhow::Result<FormState>,
    rules: &[ValidationRule],
    errors: RwSignal<ValidationErrors>,
    error: RwSignal<Option<String>>,
) -> bool {
    let state = match state {
        Ok(state) => state,
        Err(e) => {
            log::error!("Failed to snapshot form: {:#}", e);
            error.set(Some(format!("Internal error: {}", e)));
            return false;
        }
    };

    match ValidationEngine::gate(state, rules) {
        Ok(_) => {
            errors.set(ValidationErrors::default());
            error.set(None);
            true
        }
        Err(found) => {
            log::debug!("Form has {} invalid field(s)", found.len());
            errors.set(found);
            error.set(Some("Please correct the highlighted fields".to_string()));
            false
        }
    }
}

/// Message shown next to `field`, if the last save attempt flagged it
pub fn field_error(errors: RwSignal<ValidationErrors>, field: &'static str) -> Option<String> {
    errors.with(|e| e.get(field).map(str::to_string))
}
