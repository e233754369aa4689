use leptos::*;
use leptos_router::use_query_map;

pub mod utils;

mod panel;

pub use panel::SsoPanel;

#[component]
pub fn SsoPage() -> impl IntoView {
    let query = use_query_map();
    let token = query.with_untracked(|params| params.get("token").cloned());
    view! { <SsoPanel token=token /> }
}
