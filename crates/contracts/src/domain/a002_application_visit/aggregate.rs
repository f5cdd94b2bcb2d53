use crate::shared::validation::conditions::{equals, not_equals, one_of};
use crate::shared::validation::{FormState, ValidationRule};
use serde::{Deserialize, Serialize};

/// Scheduling status of an application visit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisitStatus {
    Scheduled,
    Confirmed,
    Rescheduled,
    Cancelled,
}

impl VisitStatus {
    pub fn code(&self) -> &'static str {
        match self {
            VisitStatus::Scheduled => "Scheduled",
            VisitStatus::Confirmed => "Confirmed",
            VisitStatus::Rescheduled => "Rescheduled",
            VisitStatus::Cancelled => "Cancelled",
        }
    }

    pub fn all() -> Vec<VisitStatus> {
        vec![
            VisitStatus::Scheduled,
            VisitStatus::Confirmed,
            VisitStatus::Rescheduled,
            VisitStatus::Cancelled,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.code() == code)
    }
}

/// Outcome reported by the technician on site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OnsiteStatus {
    #[serde(rename = "In Progress")]
    InProgress,
    Done,
    Failed,
    Reschedule,
}

impl OnsiteStatus {
    pub fn code(&self) -> &'static str {
        match self {
            OnsiteStatus::InProgress => "In Progress",
            OnsiteStatus::Done => "Done",
            OnsiteStatus::Failed => "Failed",
            OnsiteStatus::Reschedule => "Reschedule",
        }
    }

    pub fn all() -> Vec<OnsiteStatus> {
        vec![
            OnsiteStatus::InProgress,
            OnsiteStatus::Done,
            OnsiteStatus::Failed,
            OnsiteStatus::Reschedule,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.code() == code)
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO for the application visit status form.
///
/// Statuses are kept as the selector's text so an untouched selector reads
/// as blank.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApplicationVisitDto {
    #[serde(rename = "applicationId")]
    pub application_id: i64,
    #[serde(rename = "visitId")]
    pub visit_id: Option<i64>,
    pub status: String,
    #[serde(rename = "onsiteStatus")]
    pub onsite_status: String,
    #[serde(rename = "assignedEmail")]
    pub assigned_email: String,
    pub remarks: String,
    /// YYYY-MM-DD
    #[serde(rename = "rescheduleDate")]
    pub reschedule_date: String,
    #[serde(rename = "updatedBy")]
    pub updated_by: String,
}

impl ApplicationVisitDto {
    pub fn to_form_state(&self) -> anyhow::Result<FormState> {
        FormState::from_dto(self)
    }

    pub fn validation_rules() -> Vec<ValidationRule> {
        vec![
            ValidationRule::required("status", "Status is required"),
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
            ValidationRule::when(
                "assignedEmail",
                "Assigned email is not a valid email address",
                |state| Ok(state.is_set("assignedEmail") && !state.text("assignedEmail").contains('@')),
            ),
            ValidationRule::required_when("remarks", "Remarks are required", |state| {
                equals("onsiteStatus", "Failed")(state) || equals("status", "Cancelled")(state)
            }),
            ValidationRule::required_when(
                "rescheduleDate",
                "Reschedule date is required",
                one_of("status", &["Rescheduled"]),
            ),
            ValidationRule::when(
                "rescheduleDate",
                "Reschedule date must be YYYY-MM-DD",
                |state| Ok(state.date("rescheduleDate").is_err()),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::ValidationEngine;

    fn validate(dto: &ApplicationVisitDto) -> crate::shared::validation::ValidationErrors {
        ValidationEngine::validate(
            &dto.to_form_state().unwrap(),
            &ApplicationVisitDto::validation_rules(),
        )
    }

    #[test]
    fn test_confirmed_requires_onsite_status_and_email() {
        let dto = ApplicationVisitDto {
            status: "Confirmed".into(),
            ..Default::default()
        };
        let errors = validate(&dto);
        assert_eq!(errors.get("onsiteStatus"), Some("Onsite status is required"));
        assert_eq!(errors.get("assignedEmail"), Some("Assigned email is required"));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_failed_visit_needs_remarks_not_email() {
        let dto = ApplicationVisitDto {
            status: "Confirmed".into(),
            onsite_status: "Failed".into(),
            ..Default::default()
        };
        let errors = validate(&dto);
        assert!(!errors.contains("assignedEmail"));
        assert_eq!(errors.get("remarks"), Some("Remarks are required"));
    }

    #[test]
    fn test_rescheduled_needs_valid_date() {
        let mut dto = ApplicationVisitDto {
            status: "Rescheduled".into(),
            assigned_email: "tech@isp.ph".into(),
            ..Default::default()
        };
        assert_eq!(
            validate(&dto).get("rescheduleDate"),
            Some("Reschedule date is required")
        );

        dto.reschedule_date = "next week".into();
        assert_eq!(
            validate(&dto).get("rescheduleDate"),
            Some("Reschedule date must be YYYY-MM-DD")
        );

        dto.reschedule_date = "2026-11-02".into();
        assert!(validate(&dto).is_empty());
    }

    #[test]
    fn test_email_format() {
        let dto = ApplicationVisitDto {
            status: "Scheduled".into(),
            assigned_email: "tech.isp.ph".into(),
            ..Default::default()
        };
        assert_eq!(
            validate(&dto).get("assignedEmail"),
            Some("Assigned email is not a valid email address")
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(VisitStatus::from_code("Confirmed"), Some(VisitStatus::Confirmed));
        assert_eq!(OnsiteStatus::from_code("In Progress"), Some(OnsiteStatus::InProgress));
        assert_eq!(OnsiteStatus::from_code("Unknown"), None);
    }
}
