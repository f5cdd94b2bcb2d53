use super::form_state::FormState;
use crate::shared::error::RuleFault;
use std::fmt;
#[cfg(not(target_arch = "wasm32"))]
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

pub type Predicate = Arc<dyn Fn(&FormState) -> Result<bool, RuleFault> + Send + Sync>;

/// Declarative rule: `message` is reported for `field` when the predicate
/// returns `Ok(true)`.
#[derive(Clone)]
pub struct ValidationRule {
    pub field: String,
    pub message: String,
    predicate: Predicate,
}

impl ValidationRule {
    /// Rule with an arbitrary, possibly failing predicate
    pub fn when<F>(field: impl Into<String>, message: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&FormState) -> Result<bool, RuleFault> + Send + Sync + 'static,
    {
        Self {
            field: field.into(),
            message: message.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Fires when the field is blank
    pub fn required(field: impl Into<String>, message: impl Into<String>) -> Self {
        let field = field.into();
        let target = field.clone();
        Self::when(field, message, move |state| Ok(state.is_blank(&target)))
    }

    /// Fires when `condition` holds and the field is blank
    pub fn required_when<C>(
        field: impl Into<String>,
        message: impl Into<String>,
        condition: C,
    ) -> Self
    where
        C: Fn(&FormState) -> bool + Send + Sync + 'static,
    {
        let field = field.into();
        let target = field.clone();
        Self::when(field, message, move |state| {
            Ok(condition(state) && state.is_blank(&target))
        })
    }

    /// Run the predicate. On native targets a panic inside it is reported as
    /// [`RuleFault::Panicked`]; on wasm32 panics abort, so predicates must
    /// return `Err` instead of panicking.
    pub fn evaluate(&self, state: &FormState) -> Result<bool, RuleFault> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            std::panic::catch_unwind(AssertUnwindSafe(|| (self.predicate)(state)))
                .unwrap_or(Err(RuleFault::Panicked))
        }
        #[cfg(target_arch = "wasm32")]
        {
            (self.predicate)(state)
        }
    }
}

impl fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRule")
            .field("field", &self.field)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Condition helpers for [`ValidationRule::required_when`]
pub mod conditions {
    use super::FormState;

    pub fn equals(
        field: &'static str,
        expected: &'static str,
    ) -> impl Fn(&FormState) -> bool + Send + Sync + 'static {
        move |state| state.text(field).trim() == expected
    }

    pub fn not_equals(
        field: &'static str,
        expected: &'static str,
    ) -> impl Fn(&FormState) -> bool + Send + Sync + 'static {
        move |state| state.text(field).trim() != expected
    }

    pub fn one_of(
        field: &'static str,
        expected: &'static [&'static str],
    ) -> impl Fn(&FormState) -> bool + Send + Sync + 'static {
        move |state| {
            let value = state.text(field);
            expected.contains(&value.trim())
        }
    }

    pub fn is_set(field: &'static str) -> impl Fn(&FormState) -> bool + Send + Sync + 'static {
        move |state| state.is_set(field)
    }

    pub fn is_blank(field: &'static str) -> impl Fn(&FormState) -> bool + Send + Sync + 'static {
        move |state| state.is_blank(field)
    }

    pub fn flag_unset(field: &'static str) -> impl Fn(&FormState) -> bool + Send + Sync + 'static {
        move |state| !state.flag(field)
    }
}

#[cfg(test)]
mod tests {
    use super::conditions::*;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_rule() {
        let rule = ValidationRule::required("email", "Email is required");
        assert!(rule.evaluate(&FormState::new()).unwrap());
        let state = FormState::from_pairs([("email", json!("a@b.ph"))]);
        assert!(!rule.evaluate(&state).unwrap());
    }

    #[test]
    fn test_required_when_rule() {
        let rule = ValidationRule::required_when(
            "onsiteStatus",
            "Onsite status is required",
            equals("status", "Confirmed"),
        );
        let confirmed = FormState::from_pairs([("status", json!("Confirmed"))]);
        let scheduled = FormState::from_pairs([("status", json!("Scheduled"))]);
        assert!(rule.evaluate(&confirmed).unwrap());
        assert!(!rule.evaluate(&scheduled).unwrap());
    }

    #[test]
    fn test_conditions() {
        let state = FormState::from_pairs([("type", json!("LcpNap")), ("flag", json!(false))]);
        assert!(one_of("type", &["LcpNap", "Location"])(&state));
        assert!(not_equals("type", "Account")(&state));
        assert!(is_set("type")(&state));
        assert!(is_blank("other")(&state));
        assert!(flag_unset("flag")(&state));
    }

    #[test]
    fn test_debug_hides_predicate() {
        let rule = ValidationRule::required("lcp", "LCP is required");
        let text = format!("{:?}", rule);
        assert!(text.contains("lcp"));
        assert!(text.contains(".."));
    }
}
