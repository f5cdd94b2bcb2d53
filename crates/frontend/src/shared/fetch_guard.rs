//! Reactive wrapper around [`FetchGeneration`]

use contracts::shared::fetch_guard::{FetchGeneration, FetchTicket};
use leptos::prelude::*;

/// Generation counter owned by one form instance
#[derive(Clone, Copy)]
pub struct FetchGuard {
    generation: StoredValue<FetchGeneration>,
}

impl FetchGuard {
    pub fn new() -> Self {
        Self {
            generation: StoredValue::new(FetchGeneration::new()),
        }
    }

    /// Start a request. `None` once the owning form has been disposed.
    pub fn begin(&self) -> Option<FetchTicket> {
        self.generation.try_update_value(|g| g.begin())
    }

    pub fn invalidate(&self) {
        self.generation.try_update_value(|g| g.invalidate());
    }

    /// Whether a response with `ticket` may still be applied
    pub fn accepts(&self, what: &'static str, ticket: FetchTicket) -> bool {
        match self.generation.try_with_value(|g| g.check(what, ticket)) {
            Some(Ok(())) => true,
            Some(Err(stale)) => {
                log::debug!("{}", stale);
                false
            }
            None => {
                log::debug!("{} response arrived after the form was closed", what);
                false
            }
        }
    }
}

impl Default for FetchGuard {
    fn default() -> Self {
        Self::new()
    }
}
