use crate::domain::common::{GeoAddress, GeoKind};
use crate::shared::error::RuleFault;
use crate::shared::validation::{FormState, ValidationRule};
use serde::{Deserialize, Serialize};

/// Largest splitter supported by the field teams
pub const MAX_PORT_TOTAL: u32 = 64;

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO for the "Add LCP-NAP location" form
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LcpNapLocationDto {
    pub id: Option<i64>,
    pub lcp: String,
    pub nap: String,

    #[serde(rename = "portTotal")]
    pub port_total: Option<u32>,

    #[serde(flatten)]
    pub address: GeoAddress,

    /// "lat,lng" as picked on the map, optional
    pub coordinates: String,

    #[serde(rename = "modifiedBy")]
    pub modified_by: String,
}

impl LcpNapLocationDto {
    pub fn to_form_state(&self) -> anyhow::Result<FormState> {
        FormState::from_dto(self)
    }

    pub fn validation_rules() -> Vec<ValidationRule> {
        let mut rules = vec![
            ValidationRule::required("lcp", "LCP is required"),
            ValidationRule::required("nap", "NAP is required"),
            ValidationRule::required("portTotal", "Port total is required"),
            ValidationRule::when(
                "portTotal",
                format!("Port total must be between 1 and {}", MAX_PORT_TOTAL),
                |state| {
                    Ok(state
                        .integer("portTotal")?
                        .map(|total| total < 1 || total > i64::from(MAX_PORT_TOTAL))
                        .unwrap_or(false))
                },
            ),
        ];
        rules.extend(GeoAddress::required_rules(GeoKind::Barangay));
        rules.push(ValidationRule::when(
            "coordinates",
            "Coordinates must be \"latitude,longitude\"",
            |state| {
                if state.is_blank("coordinates") {
                    return Ok(false);
                }
                Ok(parse_coordinates(&state.text("coordinates")).is_err())
            },
        ));
        rules
    }
}

/// Parse "lat,lng" and check both ranges
pub fn parse_coordinates(raw: &str) -> Result<(f64, f64), RuleFault> {
    let fault = || RuleFault::Custom(format!("invalid coordinates '{}'", raw));
    let (lat, lng) = raw.split_once(',').ok_or_else(fault)?;
    let lat: f64 = lat.trim().parse().map_err(|_| fault())?;
    let lng: f64 = lng.trim().parse().map_err(|_| fault())?;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err(fault());
    }
    Ok((lat, lng))
}
