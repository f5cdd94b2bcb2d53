use crate::domain::common::GeoAddress;
use crate::shared::validation::conditions::{equals, not_equals};
use crate::shared::validation::{FormState, ValidationRule};
use serde::{Deserialize, Serialize};

/// Which subscribers a rebate is credited to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RebateType {
    /// Every account on one LCP-NAP node
    LcpNap,
    /// Every account in one barangay
    Location,
    /// A single account
    Account,
}

impl RebateType {
    pub fn code(&self) -> &'static str {
        match self {
            RebateType::LcpNap => "LcpNap",
            RebateType::Location => "Location",
            RebateType::Account => "Account",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RebateType::LcpNap => "LCP-NAP",
            RebateType::Location => "Location",
            RebateType::Account => "Single account",
        }
    }

    pub fn all() -> Vec<RebateType> {
        vec![RebateType::LcpNap, RebateType::Location, RebateType::Account]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|t| t.code() == code)
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO for the rebate form
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RebateDto {
    pub id: Option<i64>,
    #[serde(rename = "rebateType")]
    pub rebate_type: String,
    #[serde(rename = "lcpNapId")]
    pub lcp_nap_id: Option<i64>,
    #[serde(flatten)]
    pub address: GeoAddress,
    #[serde(rename = "accountNo")]
    pub account_no: String,
    /// YYYY-MM of the affected billing month
    pub month: String,
    /// Days without service, raw input
    #[serde(rename = "numberOfDays")]
    pub number_of_days: String,
    #[serde(rename = "approvedBy")]
    pub approved_by: String,
}

impl RebateDto {
    pub fn to_form_state(&self) -> anyhow::Result<FormState> {
        FormState::from_dto(self)
    }

    /// Drop the targets that do not belong to the selected type
    pub fn clear_other_targets(&mut self) {
        let rebate_type = RebateType::from_code(&self.rebate_type);
        if rebate_type != Some(RebateType::LcpNap) {
            self.lcp_nap_id = None;
        }
        if rebate_type != Some(RebateType::Location) {
            self.address = GeoAddress::default();
        }
        if rebate_type != Some(RebateType::Account) {
            self.account_no.clear();
        }
    }

    pub fn validation_rules() -> Vec<ValidationRule> {
        vec![
            ValidationRule::required("rebateType", "Rebate type is required"),
            ValidationRule::required_when(
                "lcpNapId",
                "LCP-NAP is required for an LCP-NAP rebate",
                equals("rebateType", "LcpNap"),
            ),
            ValidationRule::when(
                "lcpNapId",
                "LCP-NAP only applies to LCP-NAP rebates",
                |state| Ok(state.is_set("lcpNapId") && not_equals("rebateType", "LcpNap")(state)),
            ),
            ValidationRule::required_when(
                "barangayId",
                "Barangay is required for a location rebate",
                equals("rebateType", "Location"),
            ),
            ValidationRule::when(
                "barangayId",
                "Location only applies to location rebates",
                |state| Ok(state.is_set("barangayId") && not_equals("rebateType", "Location")(state)),
            ),
            ValidationRule::required_when(
                "accountNo",
                "Account number is required for an account rebate",
                equals("rebateType", "Account"),
            ),
            ValidationRule::when(
                "accountNo",
                "Account number only applies to account rebates",
                |state| Ok(state.is_set("accountNo") && not_equals("rebateType", "Account")(state)),
            ),
            ValidationRule::required("month", "Month is required"),
            ValidationRule::when("month", "Month must be YYYY-MM", |state| {
                if state.is_blank("month") {
                    return Ok(false);
                }
                let first_day = format!("{}-01", state.text("month").trim());
                Ok(chrono::NaiveDate::parse_from_str(&first_day, "%Y-%m-%d").is_err())
            }),
            ValidationRule::required("numberOfDays", "Number of days is required"),
            ValidationRule::when(
                "numberOfDays",
                "Number of days must be between 1 and 31",
                |state| match state.integer("numberOfDays") {
                    Ok(days) => Ok(days.map(|d| !(1..=31).contains(&d)).unwrap_or(false)),
                    Err(_) => Ok(true),
                },
            ),
            ValidationRule::required("approvedBy", "Approver is required"),
        ]
    }
}
