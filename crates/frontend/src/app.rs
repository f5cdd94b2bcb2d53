use crate::shared::form_context::provide_form_context;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Read theme and signed-in user once; forms take it from context.
    let ctx = provide_form_context();

    view! {
        <div class="forms-root" data-theme=ctx.theme.as_str()></div>
    }
}
