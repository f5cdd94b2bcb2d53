use super::model;
use crate::shared::fetch_guard::FetchGuard;
use crate::shared::form_validation::{field_error, validate_for_submit};
use crate::shared::geo_cascade::GeoCascadeVm;
use crate::shared::reference_data;
use crate::shared::select_utils::{parse_select_value, placeholder};
use contracts::domain::a006_rebate::{RebateDto, RebateType};
use contracts::domain::common::{GeoKind, LcpNapNode};
use contracts::shared::cascade::SelectOption;
use contracts::shared::fetch_guard::ReferenceData;
use contracts::shared::form_context::FormContext;
use contracts::shared::validation::ValidationErrors;
use leptos::prelude::*;
use std::rc::Rc;

/// ViewModel for the rebate form
#[derive(Clone)]
pub struct RebateVm {
    pub form: RwSignal<RebateDto>,
    pub errors: RwSignal<ValidationErrors>,
    pub error: RwSignal<Option<String>>,
    pub is_saving: RwSignal<bool>,
    pub nodes: RwSignal<ReferenceData<Vec<LcpNapNode>>>,
    pub geo: GeoCascadeVm,
    nodes_guard: FetchGuard,
    loader: FetchGuard,
    ctx: FormContext,
}

impl RebateVm {
    pub fn new(ctx: FormContext, id: Option<i64>) -> Self {
        let vm = Self {
            form: RwSignal::new(RebateDto::default()),
            errors: RwSignal::new(ValidationErrors::default()),
            error: RwSignal::new(None),
            is_saving: RwSignal::new(false),
            nodes: RwSignal::new(ReferenceData::Idle),
            geo: GeoCascadeVm::new(),
            nodes_guard: FetchGuard::new(),
            loader: FetchGuard::new(),
            ctx,
        };

        vm.load_nodes();
        match id {
            Some(id) => vm.load(id),
            None => vm.geo.load(None),
        }
        vm
    }

    pub fn type_options() -> Vec<(&'static str, &'static str)> {
        RebateType::all()
            .iter()
            .map(|t| (t.code(), t.display_name()))
            .collect()
    }

    pub fn rebate_type(&self) -> Option<RebateType> {
        self.form.with(|f| RebateType::from_code(&f.rebate_type))
    }

    pub fn field_error(&self, field: &'static str) -> Option<String> {
        field_error(self.errors, field)
    }

    /// Switching the type drops the targets of the other types
    pub fn set_rebate_type(&self, code: &str) {
        self.form.update(|f| {
            f.rebate_type = code.to_string();
            f.clear_other_targets();
        });
        if RebateType::from_code(code) != Some(RebateType::Location) {
            self.geo.select(GeoKind::Region, None);
        }
    }

    pub fn node_options(&self) -> Vec<SelectOption> {
        self.nodes.with(|data| {
            data.ready()
                .map(|nodes| {
                    nodes
                        .iter()
                        .map(|n| SelectOption::new(n.id, n.label()))
                        .collect()
                })
                .unwrap_or_default()
        })
    }

    pub fn node_placeholder(&self) -> String {
        let (enabled, loading) = self
            .nodes
            .with(|data| (data.ready().is_some(), data.is_loading()));
        placeholder("LCP-NAP", enabled, loading)
    }

    pub fn select_node_raw(&self, raw: &str) {
        let node_id = parse_select_value(raw);
        self.form.update(|f| f.lcp_nap_id = node_id);
    }

    fn load_nodes(&self) {
        let Some(ticket) = self.nodes_guard.begin() else {
            return;
        };
        self.nodes.set(ReferenceData::Loading);

        let nodes = self.nodes;
        let guard = self.nodes_guard;
        wasm_bindgen_futures::spawn_local(async move {
            let result = reference_data::fetch_lcp_nap_nodes().await;
            if !guard.accepts("LCP-NAP nodes", ticket) {
                return;
            }
            if let Err(e) = &result {
                log::error!("Failed to load LCP-NAP nodes: {}", e);
            }
            nodes.set(ReferenceData::resolve(result));
        });
    }

    fn load(&self, id: i64) {
        let Some(ticket) = self.loader.begin() else {
            return;
        };
        let loader = self.loader;
        let form = self.form;
        let error = self.error;
        let geo = self.geo;

        wasm_bindgen_futures::spawn_local(async move {
            let result = model::fetch_by_id(id).await;
            if !loader.accepts("rebate", ticket) {
                return;
            }
            match result {
                Ok(dto) => {
                    let address = dto.address;
                    form.set(dto);
                    geo.load(Some(address));
                }
                Err(e) => {
                    log::error!("Failed to load rebate {}: {}", id, e);
                    error.set(Some(format!("Load error: {}", e)));
                    geo.load(None);
                }
            }
        });
    }

    pub fn save_command(&self, on_saved: Rc<dyn Fn(())>) {
        if self.is_saving.get_untracked() {
            return;
        }

        let mut current = self.form.get_untracked();
        current.address = self.geo.address();
        current.approved_by = self.ctx.actor_email();
        current.clear_other_targets();

        if !validate_for_submit(
            current.to_form_state(),
            &RebateDto::validation_rules(),
            self.errors,
            self.error,
        ) {
            return;
        }

        self.is_saving.set(true);
        let is_saving = self.is_saving;
        let error = self.error;
        wasm_bindgen_futures::spawn_local(async move {
            let result = model::save_form(&current).await;
            is_saving.set(false);
            match result {
                Ok(()) => (on_saved)(()),
                Err(e) => {
                    log::error!("Failed to save rebate: {}", e);
                    error.set(Some(e));
                }
            }
        });
    }

    pub fn close(&self) {
        self.loader.invalidate();
        self.nodes_guard.invalidate();
        self.nodes.set(ReferenceData::Idle);
        self.geo.close();
    }
}
