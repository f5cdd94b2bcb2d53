//! Region -> city -> barangay -> location selectors shared by the forms

use crate::shared::fetch_guard::FetchGuard;
use crate::shared::reference_data;
use crate::shared::select_utils::{parse_select_value, placeholder};
use contracts::domain::common::{GeoAddress, GeoEntity, GeoKind};
use contracts::shared::cascade::{CascadeLevel, GeoCascade, SelectOption};
use contracts::shared::fetch_guard::ReferenceData;
use contracts::shared::hierarchy::HierarchyIndex;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct GeoCascadeVm {
    pub index: RwSignal<ReferenceData<HierarchyIndex<GeoEntity>>>,
    pub cascade: RwSignal<GeoCascade>,
    guard: FetchGuard,
}

impl GeoCascadeVm {
    pub fn new() -> Self {
        Self {
            index: RwSignal::new(ReferenceData::Idle),
            cascade: RwSignal::new(GeoCascade::new()),
            guard: FetchGuard::new(),
        }
    }

    /// Fetch the reference lists and rebuild the index.
    /// `restore` seeds the selection once the lists are in (edit mode).
    pub fn load(&self, restore: Option<GeoAddress>) {
        let Some(ticket) = self.guard.begin() else {
            return;
        };
        self.index.set(ReferenceData::Loading);
        self.cascade.update(|c| c.reset());

        let index = self.index;
        let cascade = self.cascade;
        let guard = self.guard;
        wasm_bindgen_futures::spawn_local(async move {
            let result = reference_data::fetch_all_geo().await;
            if !guard.accepts("geo reference data", ticket) {
                return;
            }

            if let Err(e) = &result {
                log::error!("Failed to load geo reference data: {}", e);
            }

            let data = ReferenceData::resolve(result.map(HierarchyIndex::build));
            if let (Some(stored), Some(built)) = (restore, data.ready()) {
                let stored = stored.complete_from(built);
                cascade.update(|c| c.restore(&stored.to_selection(), built));
            }
            index.set(data);
        });
    }

    /// Options of a level; empty while loading, after a failed fetch, or
    /// while the level above is unset
    pub fn options(&self, level: GeoKind) -> Vec<SelectOption> {
        let cascade = self.cascade;
        self.index.with(|data| match data.ready() {
            Some(index) => cascade.with(|c| c.options_for(level, index)),
            None => Vec::new(),
        })
    }

    pub fn selected(&self, level: GeoKind) -> Option<i64> {
        self.cascade.with(|c| c.value(level))
    }

    /// A selector is usable once its parent level holds a value
    pub fn is_enabled(&self, level: GeoKind) -> bool {
        let loaded = self.index.with(|data| data.ready().is_some());
        loaded
            && level
                .parent()
                .map(|parent| self.selected(parent).is_some())
                .unwrap_or(true)
    }

    pub fn select(&self, level: GeoKind, value: Option<i64>) {
        self.cascade.update(|c| match value {
            Some(value) => c.set_level(level, value),
            None => c.clear_level(level),
        });
    }

    /// Handler input for a selector's change event
    pub fn select_raw(&self, level: GeoKind, raw: &str) {
        self.select(level, parse_select_value(raw));
    }

    pub fn placeholder(&self, level: GeoKind) -> String {
        placeholder(
            level.display_name(),
            self.is_enabled(level),
            self.is_loading(),
        )
    }

    pub fn address(&self) -> GeoAddress {
        self.cascade
            .with(|c| GeoAddress::from_selection(&c.selection()))
    }

    pub fn is_loading(&self) -> bool {
        self.index.with(|data| data.is_loading())
    }

    pub fn load_error(&self) -> Option<String> {
        self.index.with(|data| data.error().map(str::to_string))
    }

    /// Drop the reference data; late responses are discarded
    pub fn close(&self) {
        self.guard.invalidate();
        self.index.set(ReferenceData::Idle);
        self.cascade.update(|c| c.reset());
    }
}

impl Default for GeoCascadeVm {
    fn default() -> Self {
        Self::new()
    }
}
