//! Declarative form validation
//!
//! Forms declare a list of [`ValidationRule`]s; [`ValidationEngine`] runs all
//! of them against a [`FormState`] snapshot when the user presses save and
//! returns every failing field at once.

mod form_state;
mod rule;

pub use form_state::FormState;
pub use rule::{conditions, Predicate, ValidationRule};

use super::error::FormError;
use serde::Serialize;
use std::collections::BTreeMap;

/// Field -> message map. Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }

    /// All messages, one per line, for an error banner
    pub fn summary(&self) -> String {
        self.0.values().cloned().collect::<Vec<_>>().join("\n")
    }
}

pub struct ValidationEngine;

impl ValidationEngine {
    /// Evaluate every rule against `state`.
    ///
    /// When several rules fire for one field the first declared wins. A rule
    /// whose predicate fails is logged and counted as not firing. Panicking
    /// predicates count as failed on native targets only: see
    /// [`ValidationRule::evaluate`].
    pub fn validate(state: &FormState, rules: &[ValidationRule]) -> ValidationErrors {
        let mut errors = BTreeMap::new();

        for rule in rules {
            if errors.contains_key(&rule.field) {
                continue;
            }
            match rule.evaluate(state) {
                Ok(true) => {
                    errors.insert(rule.field.clone(), rule.message.clone());
                }
                Ok(false) => {}
                Err(fault) => {
                    log::warn!(
                        "{}",
                        FormError::RuleEvaluationFault {
                            field: rule.field.clone(),
                            fault,
                        }
                    );
                }
            }
        }

        ValidationErrors(errors)
    }

    /// Hand the state on for submission only when no rule fires
    pub fn gate(state: FormState, rules: &[ValidationRule]) -> Result<FormState, ValidationErrors> {
        let errors = Self::validate(&state, rules);
        if errors.is_empty() {
            Ok(state)
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::conditions::{equals, not_equals};
    use super::*;
    use crate::shared::error::RuleFault;
    use maplit::btreemap;
    use serde_json::json;

    fn visit_rules() -> Vec<ValidationRule> {
        vec![
            ValidationRule::required_when(
                "onsiteStatus",
                "Onsite status is required",
                equals("status", "Confirmed"),
            ),
            ValidationRule::required_when(
                "assignedEmail",
                "Assigned email is required",
                not_equals("onsiteStatus", "Failed"),
            ),
        ]
    }

    #[test]
    fn test_confirmed_with_empty_onsite_status() {
        let state = FormState::from_pairs([
            ("status", json!("Confirmed")),
            ("onsiteStatus", json!("")),
            ("assignedEmail", json!("")),
        ]);
        let errors = ValidationEngine::validate(&state, &visit_rules());
        assert_eq!(
            errors.into_inner(),
            btreemap! {
                "assignedEmail".to_string() => "Assigned email is required".to_string(),
                "onsiteStatus".to_string() => "Onsite status is required".to_string(),
            }
        );
    }

    #[test]
    fn test_failed_onsite_status_skips_email() {
        let state = FormState::from_pairs([
            ("status", json!("Confirmed")),
            ("onsiteStatus", json!("Failed")),
            ("assignedEmail", json!("")),
        ]);
        assert!(ValidationEngine::validate(&state, &visit_rules()).is_empty());
    }

    #[test]
    fn test_first_declared_rule_wins() {
        let rules = vec![
            ValidationRule::required("billingDay", "Billing day is required"),
            ValidationRule::when("billingDay", "Billing day must be a number", |s| {
                Ok(s.number("billingDay").is_err())
            }),
        ];
        let errors = ValidationEngine::validate(&FormState::new(), &rules);
        assert_eq!(errors.get("billingDay"), Some("Billing day is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_validation_is_deterministic() {
        let state = FormState::from_pairs([("status", json!("Confirmed"))]);
        let rules = visit_rules();
        let first = ValidationEngine::validate(&state, &rules);
        let second = ValidationEngine::validate(&state, &rules);
        assert_eq!(first, second);
    }

    #[test]
    fn test_faulting_rule_fails_open() {
        let mut rules = vec![ValidationRule::when("broken", "never shown", |_| {
            Err(RuleFault::Custom("malformed rule".into()))
        })];
        for i in 0..9 {
            rules.push(ValidationRule::required(
                format!("field{}", i),
                format!("Field {} is required", i),
            ));
        }

        let errors = ValidationEngine::validate(&FormState::new(), &rules);
        assert_eq!(errors.len(), 9);
        assert!(!errors.contains("broken"));
        assert_eq!(errors.get("field4"), Some("Field 4 is required"));
    }

    #[test]
    fn test_fault_does_not_shadow_later_rule_for_same_field() {
        let rules = vec![
            ValidationRule::when("day", "never shown", |_| {
                Err(RuleFault::Custom("malformed rule".into()))
            }),
            ValidationRule::required("day", "Day is required"),
        ];
        let state = FormState::from_pairs([("day", json!("   "))]);
        assert_eq!(
            ValidationEngine::validate(&state, &rules).get("day"),
            Some("Day is required")
        );
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_panicking_rule_fails_open() {
        let rules = vec![
            ValidationRule::when("day", "never shown", |state| {
                let days: Vec<i64> = Vec::new();
                Ok(days[state.text("day").len()] > 0)
            }),
            ValidationRule::required("day", "Day is required"),
            ValidationRule::required("month", "Month is required"),
        ];
        assert_eq!(
            rules[0].evaluate(&FormState::new()),
            Err(RuleFault::Panicked)
        );

        let errors = ValidationEngine::validate(&FormState::new(), &rules);
        assert_eq!(errors.get("day"), Some("Day is required"));
        assert_eq!(errors.get("month"), Some("Month is required"));
    }

    #[test]
    fn test_gate() {
        let rules = vec![ValidationRule::required("lcp", "LCP is required")];
        let errors = ValidationEngine::gate(FormState::new(), &rules).unwrap_err();
        assert_eq!(errors.summary(), "LCP is required");

        let state = FormState::from_pairs([("lcp", json!("LCP 001"))]);
        assert_eq!(ValidationEngine::gate(state.clone(), &rules), Ok(state));
    }
}
