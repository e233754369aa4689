use crate::{
    components::notification_bell::NotificationBell,
    state::auth::{use_auth, use_logout},
};
use leptos::*;

pub const NAV_LINKS: &[(&str, &str)] = &[
    ("/dashboard", "📊 Overview"),
    ("/dashboard/calendar", "📅 Calendar"),
];

#[component]
pub fn Sidebar(#[prop(into)] active: String) -> impl IntoView {
    view! {
        <aside class="sidebar w-56 shrink-0 bg-surface-elevated border-r border-border min-h-screen">
            <div class="sidebar-header px-4 py-5 border-b border-border">
                <h2 class="text-lg font-semibold text-fg">"Navigation"</h2>
            </div>
            <nav class="sidebar-nav flex flex-col gap-1 p-2">
                {NAV_LINKS
                    .iter()
                    .map(|&(href, label)| {
                        let class = nav_link_class(href, &active);
                        view! { <a href=href class=class>{label}</a> }
                    })
                    .collect_view()}
            </nav>
        </aside>
    }
}

fn nav_link_class(href: &str, active: &str) -> &'static str {
    if href == active {
        "active px-3 py-2 rounded-md text-sm font-medium bg-action-primary-bg text-action-primary-text"
    } else {
        "px-3 py-2 rounded-md text-sm font-medium text-fg-muted hover:text-fg hover:bg-action-ghost-bg-hover"
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let (auth, _set_auth) = use_auth();
    let logout = use_logout();
    let username = move || {
        auth.get()
            .user
            .map(|u| u.username)
            .unwrap_or_default()
    };
    let projects = move || {
        auth.get()
            .user
            .map(|u| u.projects.join(", "))
            .unwrap_or_default()
    };

    view! {
        <header class="dashboard-header bg-surface-elevated shadow-sm border-b border-border">
            <div class="header-content flex justify-between items-center h-16 px-6">
                <h1 class="text-xl font-semibold text-fg">"PI Dashboard"</h1>
                <div class="header-user flex items-center gap-6">
                    <NotificationBell/>
                    <span class="text-sm text-fg">"Welcome, " {username}</span>
                    <span class="project-info text-sm text-fg-muted">"Projects: " {projects}</span>
                    <button
                        class="logout-btn text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover"
                        on:click=move |_| logout.call(())
                    >
                        "Logout"
                    </button>
                </div>
            </div>
        </header>
    }
}

#[component]
pub fn Layout(#[prop(into)] active: String, children: Children) -> impl IntoView {
    view! {
        <div class="dashboard-layout flex min-h-screen bg-surface">
            <Sidebar active=active/>
            <div class="main-content flex-1 min-w-0">
                <Header/>
                <main class="max-w-7xl mx-auto py-6 px-4 sm:px-6 lg:px-8">
                    {children()}
                </main>
            </div>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

#[component]
pub fn ErrorMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded mb-4">
            <p class="text-sm">{message}</p>
        </div>
    }
}

#[component]
pub fn SuccessMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="bg-status-success-bg border border-status-success-border text-status-success-text px-4 py-3 rounded mb-4">
            <p class="text-sm">{message}</p>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::sso_user;
    use crate::test_support::ssr::{render_as, render_to_string};

    #[test]
    fn header_shows_user_and_projects() {
        let html = render_as(Some(sso_user()), move || view! { <Header/> });
        assert!(html.contains("PI Dashboard"));
        assert!(html.contains("pi-sso"));
        assert!(html.contains("P1, P2"));
        assert!(html.contains("Logout"));
    }

    #[test]
    fn layout_marks_active_link_and_renders_children() {
        let html = render_as(Some(sso_user()), move || {
            view! { <Layout active="/dashboard/calendar"><div>"child"</div></Layout> }
        });
        assert!(html.contains("child"));
        assert!(html.contains("Navigation"));
        assert!(html.contains("Calendar"));
    }

    #[test]
    fn nav_link_class_highlights_exact_match_only() {
        assert!(nav_link_class("/dashboard", "/dashboard").starts_with("active"));
        assert!(!nav_link_class("/dashboard", "/dashboard/calendar").starts_with("active"));
    }

    #[test]
    fn renders_feedback_components() {
        let html = render_to_string(move || {
            view! {
                <div>
                    <LoadingSpinner/>
                    <ErrorMessage message="error"/>
                    <SuccessMessage message="ok"/>
                </div>
            }
        });
        assert!(html.contains("animate-spin"));
        assert!(html.contains("error"));
        assert!(html.contains("ok"));
    }
}
