use super::model;
use crate::shared::fetch_guard::FetchGuard;
use crate::shared::form_validation::{field_error, validate_for_submit};
use contracts::domain::a005_discount::{DiscountDto, DiscountStatus};
use contracts::shared::validation::ValidationErrors;
use leptos::prelude::*;
use std::rc::Rc;

#[derive(Clone, Copy)]
pub struct DiscountVm {
    pub form: RwSignal<DiscountDto>,
    pub errors: RwSignal<ValidationErrors>,
    pub error: RwSignal<Option<String>>,
    pub is_saving: RwSignal<bool>,
    loader: FetchGuard,
}

impl DiscountVm {
    pub fn new(id: Option<i64>) -> Self {
        let vm = Self {
            form: RwSignal::new(DiscountDto::default()),
            errors: RwSignal::new(ValidationErrors::default()),
            error: RwSignal::new(None),
            is_saving: RwSignal::new(false),
            loader: FetchGuard::new(),
        };
        if let Some(id) = id {
            vm.load(id);
        }
        vm
    }

    pub fn status_options() -> Vec<&'static str> {
        DiscountStatus::all().iter().map(DiscountStatus::code).collect()
    }

    pub fn field_error(&self, field: &'static str) -> Option<String> {
        field_error(self.errors, field)
    }

    fn load(&self, id: i64) {
        let Some(ticket) = self.loader.begin() else {
            return;
        };
        let loader = self.loader;
        let form = self.form;
        let error = self.error;
        wasm_bindgen_futures::spawn_local(async move {
            let result = model::fetch_by_id(id).await;
            if !loader.accepts("discount", ticket) {
                return;
            }
            match result {
                Ok(dto) => form.set(dto),
                Err(e) => {
                    log::error!("Failed to load discount {}: {}", id, e);
                    error.set(Some(format!("Load error: {}", e)));
                }
            }
        });
    }

    pub fn save_command(&self, on_saved: Rc<dyn Fn(())>) {
        if self.is_saving.get_untracked() {
            return;
        }

        let current = self.form.get_untracked();
        if !validate_for_submit(
            current.to_form_state(),
            &DiscountDto::validation_rules(),
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
                    log::error!("Failed to save discount: {}", e);
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
