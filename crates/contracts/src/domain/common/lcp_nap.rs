use serde::{Deserialize, Serialize};

/// LCP-NAP distribution node with a fixed number of subscriber ports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LcpNapNode {
    pub id: i64,
    pub lcp: String,
    pub nap: String,
    #[serde(rename = "portTotal")]
    pub port_total: u32,
    #[serde(rename = "locationId", default)]
    pub location_id: Option<i64>,
}

impl LcpNapNode {
    /// Combined label shown in selectors, e.g. "LCP 004 / NAP 012"
    pub fn label(&self) -> String {
        format!("{} / {}", self.lcp, self.nap)
    }
}

/// One port of a node and the service order holding it, if any
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSlot {
    #[serde(rename = "nodeId")]
    pub node_id: i64,
    #[serde(rename = "portNumber")]
    pub port_number: u32,
    #[serde(rename = "occupantServiceOrderId", default)]
    pub occupant_service_order_id: Option<i64>,
}

impl PortSlot {
    pub fn occupied(node_id: i64, port_number: u32, service_order_id: i64) -> Self {
        Self {
            node_id,
            port_number,
            occupant_service_order_id: Some(service_order_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_label() {
        let node = LcpNapNode {
            id: 7,
            lcp: "LCP 004".into(),
            nap: "NAP 012".into(),
            port_total: 8,
            location_id: None,
        };
        assert_eq!(node.label(), "LCP 004 / NAP 012");
    }

    #[test]
    fn test_port_slot_json() {
        let slot: PortSlot =
            serde_json::from_str(r#"{"nodeId": 7, "portNumber": 3, "occupantServiceOrderId": 55}"#)
                .unwrap();
        assert_eq!(slot, PortSlot::occupied(7, 3, 55));

        let free: PortSlot = serde_json::from_str(r#"{"nodeId": 7, "portNumber": 4}"#).unwrap();
        assert_eq!(free.occupant_service_order_id, None);
    }
}
