use leptos::*;

use crate::api::{ApiClient, AuthUser};
use crate::state::auth::use_session;
use crate::test_support::helpers::provide_auth;

pub fn with_runtime<T>(f: impl FnOnce() -> T) -> T {
    let runtime = leptos::create_runtime();
    let result = f();
    runtime.dispose();
    result
}

/// Renders with resources suppressed, so nothing reaches the network.
pub fn render_to_string<F, N>(view: F) -> String
where
    F: FnOnce() -> N + 'static,
    N: IntoView + 'static,
{
    leptos_reactive::suppress_resource_load(true);
    let html = with_runtime(|| view().into_view().render_to_string().to_string());
    leptos_reactive::suppress_resource_load(false);
    html
}

/// Renders `view` under an in-memory session holding `user`.
pub fn render_as<F, N>(user: Option<AuthUser>, view: F) -> String
where
    F: FnOnce() -> N + 'static,
    N: IntoView + 'static,
{
    render_to_string(move || {
        provide_auth(user);
        let store = use_session().store();
        provide_context(ApiClient::new_with_base_url("http://localhost:0/api").with_store(store));
        view()
    })
}
