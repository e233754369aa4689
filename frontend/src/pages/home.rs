use crate::{
    config,
    state::auth::{logout_destination, redirect_to, use_auth},
};
use leptos::*;

/// Signed-in users go to the dashboard, everyone else to the PI website.
pub fn home_destination(is_authenticated: bool, pi_website_url: &str) -> String {
    if is_authenticated {
        "/dashboard".to_string()
    } else {
        logout_destination(pi_website_url)
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let (auth, _) = use_auth();

    create_effect(move |_| {
        let state = auth.get();
        if state.loading {
            return;
        }
        let target = home_destination(state.is_authenticated, &config::pi_website_url());
        redirect_to(&target);
    });

    view! {
        <div class="loading-screen min-h-screen flex items-center justify-center bg-surface">
            <div class="loading-spinner text-fg-muted">"Redirecting..."</div>
        </div>
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::HomePage;
    use crate::test_support::ssr::render_as;
    use leptos::*;

    #[test]
    fn renders_redirect_notice() {
        let html = render_as(None, move || view! { <HomePage/> });
        assert!(html.contains("Redirecting..."));
    }
}
