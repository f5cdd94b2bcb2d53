use super::model;
use crate::shared::fetch_guard::FetchGuard;
use crate::shared::form_validation::{field_error, validate_for_submit};
use crate::shared::geo_cascade::GeoCascadeVm;
use contracts::domain::a003_job_order_assign::JobOrderAssignDto;
use contracts::shared::form_context::FormContext;
use contracts::shared::validation::ValidationErrors;
use leptos::prelude::*;
use std::rc::Rc;

/// ViewModel for assigning a technician and billing terms to a job order
#[derive(Clone)]
pub struct JobOrderAssignVm {
    pub job_order_id: i64,
    pub form: RwSignal<JobOrderAssignDto>,
    pub errors: RwSignal<ValidationErrors>,
    pub error: RwSignal<Option<String>>,
    pub is_saving: RwSignal<bool>,
    pub geo: GeoCascadeVm,
    loader: FetchGuard,
    ctx: FormContext,
}

impl JobOrderAssignVm {
    pub fn new(ctx: FormContext, job_order_id: i64) -> Self {
        let vm = Self {
            job_order_id,
            form: RwSignal::new(JobOrderAssignDto {
                job_order_id: Some(job_order_id),
                ..Default::default()
            }),
            errors: RwSignal::new(ValidationErrors::default()),
            error: RwSignal::new(None),
            is_saving: RwSignal::new(false),
            geo: GeoCascadeVm::new(),
            loader: FetchGuard::new(),
            ctx,
        };
        vm.load();
        vm
    }

    pub fn field_error(&self, field: &'static str) -> Option<String> {
        field_error(self.errors, field)
    }

    /// Ticking "last day of month" blanks the manual billing day
    pub fn set_last_day_of_month(&self, checked: bool) {
        self.form.update(|f| {
            f.is_last_day_of_month = checked;
            if checked {
                f.billing_day.clear();
            }
        });
    }

    fn load(&self) {
        let Some(ticket) = self.loader.begin() else {
            return;
        };
        let loader = self.loader;
        let job_order_id = self.job_order_id;
        let form = self.form;
        let error = self.error;
        let geo = self.geo;

        wasm_bindgen_futures::spawn_local(async move {
            let result = model::fetch_by_id(job_order_id).await;
            if !loader.accepts("job order", ticket) {
                return;
            }
            match result {
                Ok(mut dto) => {
                    dto.job_order_id = Some(job_order_id);
                    let address = dto.address;
                    form.set(dto);
                    geo.load(Some(address));
                }
                Err(e) => {
                    log::error!("Failed to load job order {}: {}", job_order_id, e);
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
        current.assigned_by = self.ctx.actor_email();

        if !validate_for_submit(
            current.to_form_state(),
            &JobOrderAssignDto::validation_rules(),
            self.errors,
            self.error,
        ) {
            return;
        }
        log::debug!(
            "Assigning job order {} with billing day {:?}",
            self.job_order_id,
            current.effective_billing_day()
        );

        self.is_saving.set(true);
        let job_order_id = self.job_order_id;
        let is_saving = self.is_saving;
        let error = self.error;
        wasm_bindgen_futures::spawn_local(async move {
            let result = model::save_form(job_order_id, &current).await;
            is_saving.set(false);
            match result {
                Ok(()) => (on_saved)(()),
                Err(e) => {
                    log::error!("Failed to assign job order {}: {}", job_order_id, e);
                    error.set(Some(e));
                }
            }
        });
    }

    pub fn close(&self) {
        self.loader.invalidate();
        self.geo.close();
    }
}
