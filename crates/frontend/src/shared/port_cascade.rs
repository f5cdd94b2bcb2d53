//! LCP-NAP node -> port selectors with occupied ports filtered out

use crate::shared::fetch_guard::FetchGuard;
use crate::shared::reference_data;
use crate::shared::select_utils::{parse_select_value, placeholder};
use contracts::shared::cascade::{
    CascadeController, CascadeSelection, NetworkLevel, PortAllocation, SelectOption,
};
use contracts::shared::fetch_guard::ReferenceData;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct PortCascadeVm {
    pub allocation: RwSignal<ReferenceData<PortAllocation>>,
    pub cascade: RwSignal<CascadeController<NetworkLevel>>,
    pub ports_loading: RwSignal<bool>,
    nodes_guard: FetchGuard,
    ports_guard: FetchGuard,
}

impl PortCascadeVm {
    pub fn new() -> Self {
        Self {
            allocation: RwSignal::new(ReferenceData::Idle),
            cascade: RwSignal::new(CascadeController::new()),
            ports_loading: RwSignal::new(false),
            nodes_guard: FetchGuard::new(),
            ports_guard: FetchGuard::new(),
        }
    }

    /// Fetch the node list. `editing_order` is the service order being
    /// edited, whose own port stays selectable; `restore` seeds the selection.
    pub fn load(&self, editing_order: Option<i64>, restore: CascadeSelection<NetworkLevel>) {
        let Some(ticket) = self.nodes_guard.begin() else {
            return;
        };
        self.ports_guard.invalidate();
        self.allocation.set(ReferenceData::Loading);
        self.cascade.update(|c| c.reset());

        let vm = *self;
        wasm_bindgen_futures::spawn_local(async move {
            let result = reference_data::fetch_lcp_nap_nodes().await;
            if !vm.nodes_guard.accepts("LCP-NAP nodes", ticket) {
                return;
            }
            if let Err(e) = &result {
                log::error!("Failed to load LCP-NAP nodes: {}", e);
            }

            let data = ReferenceData::resolve(
                result.map(|nodes| PortAllocation::new(nodes, editing_order)),
            );
            let known_node = restore
                .get(NetworkLevel::LcpNap)
                .filter(|id| data.ready().and_then(|a| a.node(*id)).is_some());
            vm.allocation.set(data);

            if let Some(node_id) = known_node {
                vm.cascade
                    .update(|c| c.set_level(NetworkLevel::LcpNap, node_id));
                vm.load_ports(node_id, restore.get(NetworkLevel::Port));
            }
        });
    }

    /// Re-fetch the occupied ports of `node_id`. Until the response arrives
    /// the port selector has no options.
    fn load_ports(&self, node_id: i64, restore_port: Option<i64>) {
        let Some(ticket) = self.ports_guard.begin() else {
            return;
        };
        let editing_order = self
            .allocation
            .with(|data| data.ready().and_then(PortAllocation::editing_order));
        self.allocation.update(|data| {
            if let Some(allocation) = data.ready_mut() {
                allocation.clear_occupancy();
            }
        });
        self.ports_loading.set(true);

        let vm = *self;
        wasm_bindgen_futures::spawn_local(async move {
            let result = reference_data::fetch_used_ports(node_id, editing_order).await;
            if !vm.ports_guard.accepts("used ports", ticket) {
                return;
            }
            vm.ports_loading.set(false);

            match result {
                Ok(slots) => {
                    vm.allocation.update(|data| {
                        if let Some(allocation) = data.ready_mut() {
                            allocation.set_occupancy(node_id, slots);
                        }
                    });
                    if let Some(port) = restore_port {
                        if vm.options(NetworkLevel::Port).iter().any(|o| o.value == port) {
                            vm.cascade.update(|c| c.set_level(NetworkLevel::Port, port));
                        } else {
                            log::warn!("Stored port {} on node {} is no longer available", port, node_id);
                        }
                    }
                }
                // Occupancy stays unknown, so no port is offered
                Err(e) => log::error!("Failed to load used ports of node {}: {}", node_id, e),
            }
        });
    }

    pub fn options(&self, level: NetworkLevel) -> Vec<SelectOption> {
        let cascade = self.cascade;
        self.allocation.with(|data| match data.ready() {
            Some(allocation) => cascade.with(|c| c.options_for(level, allocation)),
            None => Vec::new(),
        })
    }

    pub fn selected(&self, level: NetworkLevel) -> Option<i64> {
        self.cascade.with(|c| c.value(level))
    }

    pub fn select_node(&self, node_id: Option<i64>) {
        match node_id {
            Some(node_id) => {
                self.cascade
                    .update(|c| c.set_level(NetworkLevel::LcpNap, node_id));
                self.load_ports(node_id, None);
            }
            None => {
                self.ports_guard.invalidate();
                self.ports_loading.set(false);
                self.cascade.update(|c| c.clear_level(NetworkLevel::LcpNap));
                self.allocation.update(|data| {
                    if let Some(allocation) = data.ready_mut() {
                        allocation.clear_occupancy();
                    }
                });
            }
        }
    }

    pub fn select_port(&self, port: Option<i64>) {
        self.cascade.update(|c| match port {
            Some(port) => c.set_level(NetworkLevel::Port, port),
            None => c.clear_level(NetworkLevel::Port),
        });
    }

    pub fn select_raw(&self, level: NetworkLevel, raw: &str) {
        let value = parse_select_value(raw);
        match level {
            NetworkLevel::LcpNap => self.select_node(value),
            NetworkLevel::Port => self.select_port(value),
        }
    }

    pub fn placeholder(&self, level: NetworkLevel) -> String {
        let (label, enabled, loading) = match level {
            NetworkLevel::LcpNap => (
                "LCP-NAP",
                self.allocation.with(|data| data.ready().is_some()),
                self.allocation.with(|data| data.is_loading()),
            ),
            NetworkLevel::Port => (
                "Port",
                self.selected(NetworkLevel::LcpNap).is_some(),
                self.ports_loading.get(),
            ),
        };
        placeholder(label, enabled, loading)
    }

    pub fn selection(&self) -> CascadeSelection<NetworkLevel> {
        self.cascade.with(|c| c.selection())
    }

    /// Allocation snapshot the save-time rules run against
    pub fn snapshot(&self) -> PortAllocation {
        self.allocation
            .with(|data| data.ready().cloned().unwrap_or_default())
    }

    pub fn close(&self) {
        self.nodes_guard.invalidate();
        self.ports_guard.invalidate();
        self.ports_loading.set(false);
        self.allocation.set(ReferenceData::Idle);
        self.cascade.update(|c| c.reset());
    }
}

impl Default for PortCascadeVm {
    fn default() -> Self {
        Self::new()
    }
}
