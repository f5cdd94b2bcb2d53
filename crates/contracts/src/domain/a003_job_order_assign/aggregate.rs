use crate::domain::common::{GeoAddress, GeoKind};
use crate::shared::validation::conditions::flag_unset;
use crate::shared::validation::{FormState, ValidationRule};
use serde::{Deserialize, Serialize};

/// Highest fixed billing day; later days go through the last-day-of-month flag
pub const MAX_BILLING_DAY: i64 = 30;

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO for assigning a job order to a technician
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JobOrderAssignDto {
    #[serde(rename = "jobOrderId")]
    pub job_order_id: Option<i64>,

    /// Installation address
    #[serde(flatten)]
    pub address: GeoAddress,

    #[serde(rename = "installationAddress")]
    pub installation_address: String,

    #[serde(rename = "assignedEmail")]
    pub assigned_email: String,

    /// Raw input, parsed on validation
    #[serde(rename = "installationFee")]
    pub installation_fee: String,

    #[serde(rename = "billingDay")]
    pub billing_day: String,

    #[serde(rename = "isLastDayOfMonth")]
    pub is_last_day_of_month: bool,

    #[serde(rename = "assignedBy")]
    pub assigned_by: String,
}

impl JobOrderAssignDto {
    pub fn to_form_state(&self) -> anyhow::Result<FormState> {
        FormState::from_dto(self)
    }

    /// Billing day sent to the backend: 0 stands for the last day of the month
    pub fn effective_billing_day(&self) -> Option<u32> {
        if self.is_last_day_of_month {
            return Some(0);
        }
        self.billing_day.trim().parse().ok()
    }

    pub fn validation_rules() -> Vec<ValidationRule> {
        let mut rules = GeoAddress::required_rules(GeoKind::Location);
        rules.extend([
            ValidationRule::required("installationAddress", "Installation address is required"),
            ValidationRule::required("assignedEmail", "Assigned technician is required"),
            ValidationRule::when(
                "assignedEmail",
                "Assigned email is not a valid email address",
                |state| Ok(!state.text("assignedEmail").contains('@')),
            ),
            ValidationRule::when(
                "installationFee",
                "Installation fee must be a number",
                |state| match state.number("installationFee") {
                    Ok(fee) => Ok(fee.map(|fee| !fee.is_finite()).unwrap_or(false)),
                    Err(_) => Ok(true),
                },
            ),
            ValidationRule::when(
                "installationFee",
                "Installation fee must be zero or more",
                |state| Ok(state.number("installationFee")?.map(|fee| fee < 0.0).unwrap_or(false)),
            ),
            ValidationRule::required_when(
                "billingDay",
                "Billing day is required",
                flag_unset("isLastDayOfMonth"),
            ),
            ValidationRule::when(
                "billingDay",
                "Billing day must be a whole number",
                |state| Ok(!state.flag("isLastDayOfMonth") && state.integer("billingDay").is_err()),
            ),
            ValidationRule::when(
                "billingDay",
                format!("Billing day must be between 1 and {}", MAX_BILLING_DAY),
                |state| {
                    if state.flag("isLastDayOfMonth") {
                        return Ok(false);
                    }
                    Ok(state
                        .integer("billingDay")?
                        .map(|day| !(1..=MAX_BILLING_DAY).contains(&day))
                        .unwrap_or(false))
                },
            ),
        ]);
        rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::{ValidationEngine, ValidationErrors};

    fn valid_dto() -> JobOrderAssignDto {
        JobOrderAssignDto {
            job_order_id: Some(42),
            address: GeoAddress {
                region_id: Some(1),
                city_id: Some(10),
                barangay_id: Some(100),
                location_id: Some(1000),
            },
            installation_address: "Blk 4 Lot 2, Phase 1".into(),
            assigned_email: "tech@isp.ph".into(),
            installation_fee: "1500".into(),
            billing_day: "15".into(),
            is_last_day_of_month: false,
            assigned_by: "dispatcher@isp.ph".into(),
        }
    }

    fn validate(dto: &JobOrderAssignDto) -> ValidationErrors {
        ValidationEngine::validate(
            &dto.to_form_state().unwrap(),
            &JobOrderAssignDto::validation_rules(),
        )
    }

    #[test]
    fn test_valid_assignment() {
        assert!(validate(&valid_dto()).is_empty());
    }

    #[test]
    fn test_billing_day_above_30_needs_last_day_flag() {
        let mut dto = valid_dto();
        dto.billing_day = "31".into();
        assert_eq!(
            validate(&dto).get("billingDay"),
            Some("Billing day must be between 1 and 30")
        );

        dto.is_last_day_of_month = true;
        assert!(validate(&dto).is_empty());
        assert_eq!(dto.effective_billing_day(), Some(0));
    }

    #[test]
    fn test_billing_day_optional_with_last_day_flag() {
        let mut dto = valid_dto();
        dto.billing_day = String::new();
        assert_eq!(validate(&dto).get("billingDay"), Some("Billing day is required"));

        dto.is_last_day_of_month = true;
        assert!(validate(&dto).is_empty());
    }

    #[test]
    fn test_unparsable_billing_day() {
        let mut dto = valid_dto();
        dto.billing_day = "fifteen".into();
        assert_eq!(
            validate(&dto).get("billingDay"),
            Some("Billing day must be a whole number")
        );
        assert_eq!(dto.effective_billing_day(), None);
    }

    #[test]
    fn test_location_level_required() {
        let mut dto = valid_dto();
        dto.address.location_id = None;
        assert_eq!(validate(&dto).get("locationId"), Some("Location is required"));
    }

    #[test]
    fn test_negative_fee() {
        let mut dto = valid_dto();
        dto.installation_fee = "-1".into();
        assert!(validate(&dto).contains("installationFee"));
        dto.installation_fee = String::new();
        assert!(validate(&dto).is_empty());
    }

    #[test]
    fn test_non_numeric_fee_is_rejected() {
        let mut dto = valid_dto();
        for fee in ["abc", "1,500", "NaN"] {
            dto.installation_fee = fee.into();
            assert_eq!(
                validate(&dto).get("installationFee"),
                Some("Installation fee must be a number"),
                "fee {:?}",
                fee
            );
        }
        dto.installation_fee = " 1500.50 ".into();
        assert!(validate(&dto).is_empty());
    }
}
