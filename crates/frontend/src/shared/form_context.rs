//! Application-wide form configuration
//!
//! Device storage is read here once, at startup. Forms receive the resulting
//! [`FormContext`] in their constructors and never touch storage themselves.

use contracts::shared::form_context::FormContext;
use leptos::prelude::*;
use web_sys::window;

const THEME_STORAGE_KEY: &str = "theme";
const AUTH_STORAGE_KEY: &str = "authData";

fn read_storage(key: &str) -> Option<String> {
    window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(key).ok().flatten())
}

/// Build the context from localStorage
pub fn load_form_context() -> FormContext {
    let theme = read_storage(THEME_STORAGE_KEY);
    let auth = read_storage(AUTH_STORAGE_KEY);
    let ctx = FormContext::from_storage_values(theme.as_deref(), auth.as_deref());
    log::debug!(
        "Form context loaded: theme={}, user={}",
        ctx.theme.as_str(),
        ctx.actor_email()
    );
    ctx
}

/// Load the context and provide it to the component tree
pub fn provide_form_context() -> FormContext {
    let ctx = load_form_context();
    provide_context(ctx.clone());
    ctx
}

/// Context provided by [`provide_form_context`], or the default one
pub fn use_form_context() -> FormContext {
    use_context::<FormContext>().unwrap_or_else(|| {
        log::warn!("FormContext not provided, using defaults");
        FormContext::default()
    })
}
