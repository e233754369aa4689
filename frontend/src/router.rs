use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;

use crate::{
    api::ApiClient,
    components::guard::RequireAuth,
    pages::{CalendarPage, DashboardPage, HomePage, LoginPage, SsoPage},
    state::auth::{AuthProvider, SessionService},
};

pub const ROUTE_PATHS: &[&str] = &["/", "/login", "/sso", "/dashboard", "/dashboard/calendar"];

pub const PROTECTED_ROUTE_PATHS: &[&str] = &["/dashboard", "/dashboard/calendar"];

pub const PUBLIC_ROUTE_PATHS: &[&str] = &["/", "/login", "/sso"];

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    let session = SessionService::browser();
    provide_context(ApiClient::new().with_store(session.store()));
    provide_context(session);
    provide_meta_context();
    view! {
        <Title text="PI Dashboard"/>
        <AuthProvider>
            <Router>
                <Routes>
                    <Route path="/" view=HomePage/>
                    <Route path="/login" view=LoginPage/>
                    <Route path="/sso" view=SsoPage/>
                    <Route path="/dashboard" view=ProtectedDashboard/>
                    <Route path="/dashboard/calendar" view=ProtectedCalendar/>
                </Routes>
            </Router>
        </AuthProvider>
    }
}

#[component]
fn ProtectedDashboard() -> impl IntoView {
    view! { <RequireAuth><DashboardPage/></RequireAuth> }
}

#[component]
fn ProtectedCalendar() -> impl IntoView {
    view! { <RequireAuth><CalendarPage/></RequireAuth> }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn dashboard_routes_are_protected() {
        for path in ["/dashboard", "/dashboard/calendar"] {
            assert!(PROTECTED_ROUTE_PATHS.contains(&path));
        }
        assert!(!PROTECTED_ROUTE_PATHS.contains(&"/sso"));
    }

    #[test]
    fn public_and_protected_cover_all_routes() {
        let all: HashSet<&str> = ROUTE_PATHS.iter().copied().collect();
        let split: HashSet<&str> = PROTECTED_ROUTE_PATHS
            .iter()
            .chain(PUBLIC_ROUTE_PATHS)
            .copied()
            .collect();
        assert_eq!(all, split);
        assert_eq!(
            PROTECTED_ROUTE_PATHS.len() + PUBLIC_ROUTE_PATHS.len(),
            ROUTE_PATHS.len()
        );
    }

    #[test]
    fn no_duplicate_routes() {
        let unique: HashSet<&str> = ROUTE_PATHS.iter().copied().collect();
        assert_eq!(unique.len(), ROUTE_PATHS.len());
    }
}
