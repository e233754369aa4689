use super::utils::{decode_sso_token, SsoError};
use crate::{
    components::layout::LoadingSpinner,
    state::auth::{redirect_to, set_sso_user, use_auth, use_session},
    utils::time::now_millis,
};
use leptos::*;

pub const AFTER_SSO_PATH: &str = "/dashboard";

#[component]
pub fn SsoPanel(#[prop(optional_no_strip)] token: Option<String>) -> impl IntoView {
    let (_auth, set_auth) = use_auth();
    let session = use_session();

    let outcome = token
        .as_deref()
        .map_or(Err(SsoError::Missing), |raw| decode_sso_token(raw, now_millis()));
    let error = create_rw_signal(outcome.as_ref().err().map(ToString::to_string));
    let pending = store_value(outcome.ok());

    create_effect(move |_| {
        let Some(user) = pending.get_value() else {
            return;
        };
        pending.set_value(None);
        match set_sso_user(user, &session, set_auth) {
            Ok(()) => redirect_to(AFTER_SSO_PATH),
            Err(err) => error.set(Some(err.error)),
        }
    });

    view! {
        <div class="loading-screen min-h-screen flex items-center justify-center bg-surface">
            <Show
                when=move || error.get().is_some()
                fallback=|| view! {
                    <div class="loading-spinner flex flex-col items-center gap-3 text-fg-muted">
                        <LoadingSpinner/>
                        <span>"Authenticating via SSO..."</span>
                    </div>
                }
            >
                <div class="error-message bg-status-error-bg border border-status-error-border text-status-error-text px-6 py-4 rounded">
                    <p>{move || error.get().unwrap_or_default()}</p>
                    <a href="/login" class="mt-2 inline-block underline">"Go to login"</a>
                </div>
            </Show>
        </div>
    }
}
