use super::model;
use crate::shared::fetch_guard::FetchGuard;
use crate::shared::form_validation::{field_error, validate_for_submit};
use crate::shared::port_cascade::PortCascadeVm;
use contracts::domain::a004_service_order::{ServiceOrderEditDto, SupportStatus};
use contracts::shared::cascade::CascadeSelection;
use contracts::shared::form_context::FormContext;
use contracts::shared::validation::ValidationErrors;
use leptos::prelude::*;
use std::rc::Rc;

/// ViewModel for the service order edit form.
/// The port selector offers free ports plus the one this order already holds.
#[derive(Clone)]
pub struct ServiceOrderVm {
    pub id: i64,
    pub form: RwSignal<ServiceOrderEditDto>,
    pub errors: RwSignal<ValidationErrors>,
    pub error: RwSignal<Option<String>>,
    pub is_saving: RwSignal<bool>,
    pub ports: PortCascadeVm,
    loader: FetchGuard,
    ctx: FormContext,
}

impl ServiceOrderVm {
    pub fn new(ctx: FormContext, id: i64) -> Self {
        let vm = Self {
            id,
            form: RwSignal::new(ServiceOrderEditDto {
                id: Some(id),
                ..Default::default()
            }),
            errors: RwSignal::new(ValidationErrors::default()),
            error: RwSignal::new(None),
            is_saving: RwSignal::new(false),
            ports: PortCascadeVm::new(),
            loader: FetchGuard::new(),
            ctx,
        };
        vm.load();
        vm
    }

    pub fn support_status_options() -> Vec<&'static str> {
        SupportStatus::all().iter().map(SupportStatus::code).collect()
    }

    pub fn field_error(&self, field: &'static str) -> Option<String> {
        field_error(self.errors, field)
    }

    /// Network selectors are only shown for the transfer concern
    pub fn shows_network(&self) -> bool {
        self.form.with(ServiceOrderEditDto::is_transfer)
    }

    fn load(&self) {
        let Some(ticket) = self.loader.begin() else {
            return;
        };
        let loader = self.loader;
        let id = self.id;
        let form = self.form;
        let error = self.error;
        let ports = self.ports;

        wasm_bindgen_futures::spawn_local(async move {
            let result = model::fetch_by_id(id).await;
            if !loader.accepts("service order", ticket) {
                return;
            }
            match result {
                Ok(mut dto) => {
                    dto.id = Some(id);
                    let restore = dto.network_selection();
                    form.set(dto);
                    ports.load(Some(id), restore);
                }
                Err(e) => {
                    log::error!("Failed to load service order {}: {}", id, e);
                    error.set(Some(format!("Load error: {}", e)));
                    ports.load(Some(id), CascadeSelection::new(Vec::new()));
                }
            }
        });
    }

    pub fn save_command(&self, on_saved: Rc<dyn Fn(())>) {
        if self.is_saving.get_untracked() {
            return;
        }

        let mut current = self.form.get_untracked();
        current.updated_by = self.ctx.actor_email();
        if current.is_transfer() {
            current.apply_network(&self.ports.selection());
        }

        let allocation = self.ports.snapshot();
        if !validate_for_submit(
            current.to_form_state(),
            &ServiceOrderEditDto::validation_rules(&allocation),
            self.errors,
            self.error,
        ) {
            return;
        }

        self.is_saving.set(true);
        let id = self.id;
        let is_saving = self.is_saving;
        let error = self.error;
        wasm_bindgen_futures::spawn_local(async move {
            let result = model::save_form(id, &current).await;
            is_saving.set(false);
            match result {
                Ok(()) => (on_saved)(()),
                Err(e) => {
                    log::error!("Failed to save service order {}: {}", id, e);
                    error.set(Some(e));
                }
            }
        });
    }

    pub fn close(&self) {
        self.loader.invalidate();
        self.ports.close();
    }
}
