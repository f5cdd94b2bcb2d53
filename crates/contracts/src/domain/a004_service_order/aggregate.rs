use crate::shared::cascade::{CascadeSelection, NetworkLevel, PortAllocation};
use crate::shared::error::RuleFault;
use crate::shared::validation::conditions::equals;
use crate::shared::validation::{FormState, ValidationRule};
use serde::{Deserialize, Serialize};

/// Concern that moves the subscriber to another LCP-NAP port
pub const TRANSFER_CONCERN: &str = "Transfer LCP/NAP/PORT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupportStatus {
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "For Visit")]
    ForVisit,
    Resolved,
}

impl SupportStatus {
    pub fn code(&self) -> &'static str {
        match self {
            SupportStatus::InProgress => "In Progress",
            SupportStatus::ForVisit => "For Visit",
            SupportStatus::Resolved => "Resolved",
        }
    }

    pub fn all() -> Vec<SupportStatus> {
        vec![
            SupportStatus::InProgress,
            SupportStatus::ForVisit,
            SupportStatus::Resolved,
        ]
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO for the service order edit form
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServiceOrderEditDto {
    pub id: Option<i64>,
    #[serde(rename = "accountNo")]
    pub account_no: String,
    #[serde(rename = "supportStatus")]
    pub support_status: String,
    pub concern: String,
    #[serde(rename = "lcpNapId")]
    pub lcp_nap_id: Option<i64>,
    pub port: Option<u32>,
    #[serde(rename = "assignedEmail")]
    pub assigned_email: String,
    #[serde(rename = "repairCategory")]
    pub repair_category: String,
    #[serde(rename = "updatedBy")]
    pub updated_by: String,
}

impl ServiceOrderEditDto {
    pub fn to_form_state(&self) -> anyhow::Result<FormState> {
        FormState::from_dto(self)
    }

    pub fn is_transfer(&self) -> bool {
        self.concern.trim() == TRANSFER_CONCERN
    }

    pub fn network_selection(&self) -> CascadeSelection<NetworkLevel> {
        let mut pairs = Vec::new();
        if let Some(node_id) = self.lcp_nap_id {
            pairs.push((NetworkLevel::LcpNap, node_id));
            if let Some(port) = self.port {
                pairs.push((NetworkLevel::Port, i64::from(port)));
            }
        }
        CascadeSelection::new(pairs)
    }

    pub fn apply_network(&mut self, selection: &CascadeSelection<NetworkLevel>) {
        self.lcp_nap_id = selection.get(NetworkLevel::LcpNap);
        self.port = selection
            .get(NetworkLevel::Port)
            .and_then(|port| u32::try_from(port).ok());
    }

    /// Rules against the port snapshot the form was showing at save time
    pub fn validation_rules(allocation: &PortAllocation) -> Vec<ValidationRule> {
        let allocation = allocation.clone();
        vec![
            ValidationRule::required("accountNo", "Account number is required"),
            ValidationRule::required("supportStatus", "Support status is required"),
            ValidationRule::required("concern", "Concern is required"),
            ValidationRule::required_when(
                "assignedEmail",
                "Assigned email is required for visits",
                equals("supportStatus", "For Visit"),
            ),
            ValidationRule::required_when(
                "repairCategory",
                "Repair category is required to resolve",
                equals("supportStatus", "Resolved"),
            ),
            ValidationRule::required_when(
                "lcpNapId",
                "LCP-NAP is required for a transfer",
                equals("concern", TRANSFER_CONCERN),
            ),
            ValidationRule::required_when(
                "port",
                "Port is required for a transfer",
                equals("concern", TRANSFER_CONCERN),
            ),
            ValidationRule::when("port", "Port is already in use", move |state| {
                let node_id = state.integer("lcpNapId")?;
                let port = state.integer("port")?;
                let (Some(node_id), Some(port)) = (node_id, port) else {
                    return Ok(false);
                };
                if !allocation.has_occupancy_for(node_id) {
                    return Err(RuleFault::Custom(format!(
                        "port occupancy of node {} not loaded",
                        node_id
                    )));
                }
                let port = u32::try_from(port)
                    .map_err(|_| RuleFault::Custom(format!("port {} out of range", port)))?;
                match allocation.check_port(node_id, port) {
                    Ok(()) => Ok(false),
                    Err(collision) => {
                        log::info!("{}", collision);
                        Ok(true)
                    }
                }
            }),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::{LcpNapNode, PortSlot};
    use crate::shared::validation::{ValidationEngine, ValidationErrors};

    const NODE: i64 = 7;
    const ORDER: i64 = 500;

    fn allocation(editing: Option<i64>) -> PortAllocation {
        let mut allocation = PortAllocation::new(
            vec![LcpNapNode {
                id: NODE,
                lcp: "LCP 004".into(),
                nap: "NAP 012".into(),
                port_total: 8,
                location_id: None,
            }],
            editing,
        );
        allocation.set_occupancy(
            NODE,
            vec![PortSlot::occupied(NODE, 2, 101), PortSlot::occupied(NODE, 4, ORDER)],
        );
        allocation
    }

    fn transfer(port: u32) -> ServiceOrderEditDto {
        ServiceOrderEditDto {
            id: Some(ORDER),
            account_no: "ACC-0001".into(),
            support_status: "In Progress".into(),
            concern: TRANSFER_CONCERN.into(),
            lcp_nap_id: Some(NODE),
            port: Some(port),
            ..Default::default()
        }
    }

    fn validate(dto: &ServiceOrderEditDto, allocation: &PortAllocation) -> ValidationErrors {
        ValidationEngine::validate(
            &dto.to_form_state().unwrap(),
            &ServiceOrderEditDto::validation_rules(allocation),
        )
    }

    #[test]
    fn test_resaving_own_port_is_not_a_collision() {
        assert!(validate(&transfer(4), &allocation(Some(ORDER))).is_empty());
    }

    #[test]
    fn test_port_held_by_other_order_is_rejected() {
        let errors = validate(&transfer(2), &allocation(Some(ORDER)));
        assert_eq!(errors.get("port"), Some("Port is already in use"));

        let mut new_order = transfer(4);
        new_order.id = None;
        assert!(validate(&new_order, &allocation(None)).contains("port"));
    }

    #[test]
    fn test_transfer_requires_node_and_port() {
        let mut dto = transfer(1);
        dto.lcp_nap_id = None;
        dto.port = None;
        let errors = validate(&dto, &allocation(Some(ORDER)));
        assert!(errors.contains("lcpNapId"));
        assert!(errors.contains("port"));
    }

    #[test]
    fn test_missing_occupancy_fails_open() {
        let no_snapshot = PortAllocation::new(Vec::new(), Some(ORDER));
        assert!(validate(&transfer(2), &no_snapshot).is_empty());
    }

    #[test]
    fn test_status_dependent_fields() {
        let mut dto = transfer(4);
        dto.support_status = "For Visit".into();
        assert!(validate(&dto, &allocation(Some(ORDER))).contains("assignedEmail"));

        dto.support_status = "Resolved".into();
        let errors = validate(&dto, &allocation(Some(ORDER)));
        assert!(!errors.contains("assignedEmail"));
        assert!(errors.contains("repairCategory"));
    }

    #[test]
    fn test_network_selection_round_trip() {
        let mut dto = transfer(4);
        let selection = dto.network_selection();
        assert_eq!(selection.get(NetworkLevel::Port), Some(4));

        dto.apply_network(&CascadeSelection::new(vec![(NetworkLevel::LcpNap, 9)]));
        assert_eq!(dto.lcp_nap_id, Some(9));
        assert_eq!(dto.port, None);
        assert!(dto.is_transfer());
    }
}
