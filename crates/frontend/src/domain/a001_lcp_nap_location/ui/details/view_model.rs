use super::model;
use crate::shared::fetch_guard::FetchGuard;
use crate::shared::form_validation::{field_error, validate_for_submit};
use crate::shared::geo_cascade::GeoCascadeVm;
use contracts::domain::a001_lcp_nap_location::LcpNapLocationDto;
use contracts::shared::form_context::FormContext;
use contracts::shared::validation::ValidationErrors;
use leptos::prelude::*;
use std::rc::Rc;

/// ViewModel for the "Add LCP-NAP location" form
#[derive(Clone)]
pub struct LcpNapLocationVm {
    pub form: RwSignal<LcpNapLocationDto>,
    pub errors: RwSignal<ValidationErrors>,
    pub error: RwSignal<Option<String>>,
    pub is_saving: RwSignal<bool>,
    pub geo: GeoCascadeVm,
    loader: FetchGuard,
    ctx: FormContext,
}

impl LcpNapLocationVm {
    pub fn new(ctx: FormContext, id: Option<i64>) -> Self {
        let vm = Self {
            form: RwSignal::new(LcpNapLocationDto::default()),
            errors: RwSignal::new(ValidationErrors::default()),
            error: RwSignal::new(None),
            is_saving: RwSignal::new(false),
            geo: GeoCascadeVm::new(),
            loader: FetchGuard::new(),
            ctx,
        };

        match id {
            Some(id) => vm.load(id),
            None => vm.geo.load(None),
        }

        vm
    }

    pub fn is_edit_mode(&self) -> bool {
        self.form.with(|f| f.id.is_some())
    }

    pub fn field_error(&self, field: &'static str) -> Option<String> {
        field_error(self.errors, field)
    }

    /// Load the stored location, then the geo lists seeded with its address
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
            if !loader.accepts("LCP-NAP location", ticket) {
                return;
            }
            match result {
                Ok(dto) => {
                    let address = dto.address;
                    form.set(dto);
                    geo.load(Some(address));
                }
                Err(e) => {
                    log::error!("Failed to load LCP-NAP location {}: {}", id, e);
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
        current.modified_by = self.ctx.actor_email();

        if !validate_for_submit(
            current.to_form_state(),
            &LcpNapLocationDto::validation_rules(),
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
                    log::error!("Failed to save LCP-NAP location: {}", e);
                    error.set(Some(e));
                }
            }
        });
    }

    /// Discard pending reference-data responses
    pub fn close(&self) {
        self.loader.invalidate();
        self.geo.close();
    }
}
