use crate::shared::validation::conditions::not_equals;
use crate::shared::validation::{FormState, ValidationRule};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscountStatus {
    Pending,
    Approved,
    Rejected,
}

impl DiscountStatus {
    pub fn code(&self) -> &'static str {
        match self {
            DiscountStatus::Pending => "Pending",
            DiscountStatus::Approved => "Approved",
            DiscountStatus::Rejected => "Rejected",
        }
    }

    pub fn all() -> Vec<DiscountStatus> {
        vec![
            DiscountStatus::Pending,
            DiscountStatus::Approved,
            DiscountStatus::Rejected,
        ]
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO for the discount form
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DiscountDto {
    pub id: Option<i64>,
    #[serde(rename = "accountNo")]
    pub account_no: String,
    /// Amount per invoice, raw input
    pub amount: String,
    /// Invoices the discount still applies to, raw input
    pub remaining: String,
    pub status: String,
    #[serde(rename = "approvedBy")]
    pub approved_by: String,
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(rename = "endDate")]
    pub end_date: String,
    pub remarks: String,
}

impl DiscountDto {
    pub fn to_form_state(&self) -> anyhow::Result<FormState> {
        FormState::from_dto(self)
    }

    pub fn validation_rules() -> Vec<ValidationRule> {
        vec![
            ValidationRule::required("accountNo", "Account number is required"),
            ValidationRule::required("amount", "Discount amount is required"),
            ValidationRule::when("amount", "Discount amount must be a number", |state| {
                Ok(state.number("amount").map_or(true, |a| a.is_some_and(|a| !a.is_finite())))
            }),
            ValidationRule::when("amount", "Discount amount must be greater than zero", |state| {
                Ok(state.number("amount")?.map(|a| a <= 0.0).unwrap_or(false))
            }),
            ValidationRule::when(
                "remaining",
                "Remaining invoices must be a whole number of zero or more",
                |state| match state.integer("remaining") {
                    Ok(remaining) => Ok(remaining.map(|n| n < 0).unwrap_or(false)),
                    Err(_) => Ok(true),
                },
            ),
            ValidationRule::required("status", "Status is required"),
            ValidationRule::required_when(
                "approvedBy",
                "Approver is required once the discount is decided",
                |state| state.is_set("status") && not_equals("status", "Pending")(state),
            ),
            ValidationRule::required("startDate", "Start date is required"),
            ValidationRule::when("startDate", "Start date must be YYYY-MM-DD", |state| {
                Ok(state.date("startDate").is_err())
            }),
            ValidationRule::when("endDate", "End date must be YYYY-MM-DD", |state| {
                Ok(state.date("endDate").is_err())
            }),
            ValidationRule::when(
                "endDate",
                "End date must not be before the start date",
                |state| match (state.date("startDate")?, state.date("endDate")?) {
                    (Some(start), Some(end)) => Ok(end < start),
                    _ => Ok(false),
                },
            ),
        ]
    }
}
