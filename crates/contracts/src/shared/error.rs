//! Error taxonomy of the form layer
//!
//! None of these reach the end user directly. They are recovered where they
//! happen and logged; only the validation error map is shown.

use thiserror::Error;

/// Errors raised by [`HierarchyIndex`](crate::shared::hierarchy::HierarchyIndex)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HierarchyError {
    #[error("children requested from an index built over an empty list")]
    EmptyInput,

    #[error("{kind} {id} not found in index")]
    UnknownEntity { kind: String, id: i64 },
}

/// Recoverable form-layer conditions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("options for {level} requested before {ancestor} was selected")]
    MissingAncestorSelection {
        level: &'static str,
        ancestor: &'static str,
    },

    #[error("{what} response discarded: generation {got} is no longer current ({current})")]
    StaleFetchDiscarded {
        what: &'static str,
        got: u64,
        current: u64,
    },

    #[error("rule for field '{field}' failed to evaluate: {fault}")]
    RuleEvaluationFault { field: String, fault: RuleFault },

    #[error("port {port} on node {node_id} is already assigned to service order {occupant}")]
    CollisionAttempt {
        node_id: i64,
        port: u32,
        occupant: i64,
    },
}

/// Failure inside a single validation predicate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleFault {
    #[error("field '{field}' holds '{value}', expected a number")]
    NotANumber { field: String, value: String },

    #[error("field '{field}' holds '{value}', expected a date (YYYY-MM-DD)")]
    NotADate { field: String, value: String },

    #[error("predicate panicked")]
    Panicked,

    #[error("{0}")]
    Custom(String),
}
