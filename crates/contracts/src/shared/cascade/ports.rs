use super::{CascadeLevel, OptionSource, SelectOption};
use crate::domain::common::lcp_nap::{LcpNapNode, PortSlot};
use crate::shared::error::FormError;

/// LCP-NAP node -> port chain of the service order form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkLevel {
    LcpNap,
    Port,
}

impl CascadeLevel for NetworkLevel {
    const CHAIN: &'static [Self] = &[NetworkLevel::LcpNap, NetworkLevel::Port];

    fn name(&self) -> &'static str {
        match self {
            NetworkLevel::LcpNap => "lcp_nap",
            NetworkLevel::Port => "port",
        }
    }
}

/// Occupancy snapshot of a single node
#[derive(Debug, Clone)]
struct NodeOccupancy {
    node_id: i64,
    slots: Vec<PortSlot>,
}

/// Port availability for the node selected in the form.
///
/// Ports are only offered once the occupancy of the selected node has been
/// loaded. A port held by `editing_order` counts as free, so an order can be
/// saved again with its own port.
#[derive(Debug, Clone, Default)]
pub struct PortAllocation {
    nodes: Vec<LcpNapNode>,
    occupancy: Option<NodeOccupancy>,
    editing_order: Option<i64>,
}

impl PortAllocation {
    pub fn new(nodes: Vec<LcpNapNode>, editing_order: Option<i64>) -> Self {
        Self {
            nodes,
            occupancy: None,
            editing_order,
        }
    }

    pub fn nodes(&self) -> &[LcpNapNode] {
        &self.nodes
    }

    pub fn node(&self, node_id: i64) -> Option<&LcpNapNode> {
        self.nodes.iter().find(|node| node.id == node_id)
    }

    pub fn editing_order(&self) -> Option<i64> {
        self.editing_order
    }

    /// Replace the occupancy snapshot after a fetch for `node_id`.
    /// Slots that belong to other nodes are ignored.
    pub fn set_occupancy(&mut self, node_id: i64, slots: Vec<PortSlot>) {
        let slots = slots
            .into_iter()
            .filter(|slot| slot.node_id == node_id)
            .collect();
        self.occupancy = Some(NodeOccupancy { node_id, slots });
    }

    /// Forget the snapshot, e.g. when the node selection changes
    pub fn clear_occupancy(&mut self) {
        self.occupancy = None;
    }

    pub fn has_occupancy_for(&self, node_id: i64) -> bool {
        self.occupancy
            .as_ref()
            .map(|o| o.node_id == node_id)
            .unwrap_or(false)
    }

    /// Free ports of `node_id` in ascending order; empty until its occupancy is loaded
    pub fn available_ports(&self, node_id: i64) -> Vec<u32> {
        let Some(node) = self.node(node_id) else {
            return Vec::new();
        };
        if !self.has_occupancy_for(node_id) {
            return Vec::new();
        }
        (1..=node.port_total)
            .filter(|port| self.occupant_other_than_self(node_id, *port).is_none())
            .collect()
    }

    /// Fails when `port` is held by a service order other than the one being edited
    pub fn check_port(&self, node_id: i64, port: u32) -> Result<(), FormError> {
        match self.occupant_other_than_self(node_id, port) {
            Some(occupant) => Err(FormError::CollisionAttempt {
                node_id,
                port,
                occupant,
            }),
            None => Ok(()),
        }
    }

    fn occupant_other_than_self(&self, node_id: i64, port: u32) -> Option<i64> {
        let occupancy = self.occupancy.as_ref().filter(|o| o.node_id == node_id)?;
        occupancy
            .slots
            .iter()
            .filter(|slot| slot.port_number == port)
            .filter_map(|slot| slot.occupant_service_order_id)
            .find(|occupant| Some(*occupant) != self.editing_order)
    }
}

impl OptionSource<NetworkLevel> for PortAllocation {
    fn options(&self, level: NetworkLevel, parent: Option<i64>) -> Vec<SelectOption> {
        match level {
            NetworkLevel::LcpNap => self
                .nodes
                .iter()
                .map(|node| SelectOption::new(node.id, node.label()))
                .collect(),
            NetworkLevel::Port => parent
                .map(|node_id| {
                    self.available_ports(node_id)
                        .into_iter()
                        .map(|port| SelectOption::new(i64::from(port), format!("Port {}", port)))
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::cascade::CascadeController;

    const NODE: i64 = 7;
    const EDITED_ORDER: i64 = 500;

    fn node(id: i64, port_total: u32) -> LcpNapNode {
        LcpNapNode {
            id,
            lcp: "LCP 004".into(),
            nap: format!("NAP {:03}", id),
            port_total,
            location_id: None,
        }
    }

    /// Ports 1-3 held by other orders, port 4 by the edited order
    fn occupancy() -> Vec<PortSlot> {
        vec![
            PortSlot::occupied(NODE, 1, 101),
            PortSlot::occupied(NODE, 2, 102),
            PortSlot::occupied(NODE, 3, 103),
            PortSlot::occupied(NODE, 4, EDITED_ORDER),
        ]
    }

    fn port_values(options: Vec<SelectOption>) -> Vec<i64> {
        options.into_iter().map(|o| o.value).collect()
    }

    #[test]
    fn test_edited_order_keeps_its_port() {
        let mut allocation = PortAllocation::new(vec![node(NODE, 8)], Some(EDITED_ORDER));
        allocation.set_occupancy(NODE, occupancy());

        let mut cascade = CascadeController::<NetworkLevel>::new();
        cascade.set_level(NetworkLevel::LcpNap, NODE);
        let ports = port_values(cascade.options_for(NetworkLevel::Port, &allocation));
        assert_eq!(ports, vec![4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_new_order_sees_only_free_ports() {
        let mut allocation = PortAllocation::new(vec![node(NODE, 8)], None);
        allocation.set_occupancy(NODE, occupancy());

        let mut cascade = CascadeController::<NetworkLevel>::new();
        cascade.set_level(NetworkLevel::LcpNap, NODE);
        let ports = port_values(cascade.options_for(NetworkLevel::Port, &allocation));
        assert_eq!(ports, vec![5, 6, 7, 8]);
    }

    #[test]
    fn test_other_order_excludes_edited_port() {
        let mut allocation = PortAllocation::new(vec![node(NODE, 8)], Some(999));
        allocation.set_occupancy(NODE, occupancy());
        assert!(!allocation.available_ports(NODE).contains(&4));
    }

    #[test]
    fn test_upper_bound_is_node_port_total() {
        let mut allocation = PortAllocation::new(vec![node(NODE, 16), node(8, 4)], None);
        allocation.set_occupancy(8, Vec::new());
        assert_eq!(allocation.available_ports(8), vec![1, 2, 3, 4]);

        allocation.set_occupancy(NODE, Vec::new());
        assert_eq!(allocation.available_ports(NODE).len(), 16);
    }

    #[test]
    fn test_no_ports_before_occupancy_loaded() {
        let mut allocation = PortAllocation::new(vec![node(NODE, 8), node(8, 8)], None);
        assert!(allocation.available_ports(NODE).is_empty());

        allocation.set_occupancy(8, Vec::new());
        assert!(allocation.available_ports(NODE).is_empty());

        allocation.clear_occupancy();
        assert!(allocation.available_ports(8).is_empty());
    }

    #[test]
    fn test_port_level_empty_without_node() {
        let allocation = PortAllocation::new(vec![node(NODE, 8)], None);
        let cascade = CascadeController::<NetworkLevel>::new();
        assert!(cascade.options_for(NetworkLevel::Port, &allocation).is_empty());
        assert_eq!(
            cascade.options_for(NetworkLevel::LcpNap, &allocation),
            vec![SelectOption::new(NODE, "LCP 004 / NAP 007")]
        );
    }

    #[test]
    fn test_check_port_reports_collision() {
        let mut allocation = PortAllocation::new(vec![node(NODE, 8)], Some(EDITED_ORDER));
        allocation.set_occupancy(NODE, occupancy());

        assert!(allocation.check_port(NODE, 4).is_ok());
        assert!(allocation.check_port(NODE, 6).is_ok());
        assert_eq!(
            allocation.check_port(NODE, 2),
            Err(FormError::CollisionAttempt {
                node_id: NODE,
                port: 2,
                occupant: 102,
            })
        );
    }

    #[test]
    fn test_foreign_slots_are_ignored() {
        let mut allocation = PortAllocation::new(vec![node(NODE, 4)], None);
        allocation.set_occupancy(NODE, vec![PortSlot::occupied(99, 1, 101)]);
        assert_eq!(allocation.available_ports(NODE), vec![1, 2, 3, 4]);
    }
}
