use super::model;
use crate::shared::fetch_guard::FetchGuard;
use crate::shared::form_validation::{field_error, validate_for_submit};
use contracts::domain::a002_application_visit::{ApplicationVisitDto, OnsiteStatus, VisitStatus};
use contracts::shared::form_context::FormContext;
use contracts::shared::validation::ValidationErrors;
use leptos::prelude::*;
use std::rc::Rc;

#[derive(Clone)]
pub struct ApplicationVisitVm {
    pub form: RwSignal<ApplicationVisitDto>,
    pub errors: RwSignal<ValidationErrors>,
    pub error: RwSignal<Option<String>>,
    pub is_saving: RwSignal<bool>,
    loader: FetchGuard,
    ctx: FormContext,
}

impl ApplicationVisitVm {
    /// `visit_id` is `None` when scheduling a new visit
    pub fn new(ctx: FormContext, application_id: i64, visit_id: Option<i64>) -> Self {
        let vm = Self {
            form: RwSignal::new(ApplicationVisitDto {
                application_id,
                visit_id,
                ..Default::default()
            }),
            errors: RwSignal::new(ValidationErrors::default()),
            error: RwSignal::new(None),
            is_saving: RwSignal::new(false),
            loader: FetchGuard::new(),
            ctx,
        };

        if let Some(visit_id) = visit_id {
            vm.load(application_id, visit_id);
        }
        vm
    }

    pub fn status_options() -> Vec<&'static str> {
        VisitStatus::all().iter().map(VisitStatus::code).collect()
    }

    pub fn onsite_options() -> Vec<&'static str> {
        OnsiteStatus::all().iter().map(OnsiteStatus::code).collect()
    }

    pub fn field_error(&self, field: &'static str) -> Option<String> {
        field_error(self.errors, field)
    }

    fn load(&self, application_id: i64, visit_id: i64) {
        let Some(ticket) = self.loader.begin() else {
            return;
        };
        let loader = self.loader;
        let form = self.form;
        let error = self.error;
        wasm_bindgen_futures::spawn_local(async move {
            let result = model::fetch_visit(application_id, visit_id).await;
            if !loader.accepts("visit", ticket) {
                return;
            }
            match result {
                Ok(dto) => form.set(dto),
                Err(e) => {
                    log::error!("Failed to load visit {}: {}", visit_id, e);
                    error.set(Some(format!("Load error: {}", e)));
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

        if !validate_for_submit(
            current.to_form_state(),
            &ApplicationVisitDto::validation_rules(),
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
                    log::error!("Failed to save visit: {}", e);
                    error.set(Some(e));
                }
            }
        });
    }

    /// Discard a pending record load
    pub fn close(&self) {
        self.loader.invalidate();
    }
}
