use crate::{
    api::UsersAttendanceResponse,
    pages::dashboard::utils::{on_field_trip, present_today, today},
};
use leptos::*;

#[component]
pub fn StatsCards(#[prop(into)] data: Signal<Option<UsersAttendanceResponse>>) -> impl IntoView {
    let cards = move || {
        data.with(|data| match data {
            Some(resp) => {
                let today = today();
                vec![
                    ("Total Users", resp.total_users.to_string(), "Under your projects"),
                    ("Present Today", present_today(&resp.data, today).to_string(), "Checked in"),
                    ("On Field Trip", on_field_trip(&resp.data).to_string(), "Currently active"),
                    ("This Month", format!("{}/{}", resp.month, resp.year), "Viewing period"),
                ]
            }
            None => vec![
                ("Total Users", "0".to_string(), ""),
                ("Present Today", "0".to_string(), ""),
                ("On Field Trip", "0".to_string(), ""),
            ],
        })
    };

    view! {
        <div class="stats-grid grid grid-cols-1 gap-4 sm:grid-cols-2 lg:grid-cols-4">
            {move || {
                cards()
                    .into_iter()
                    .map(|(title, value, subtitle)| view! { <StatCard title=title value=value subtitle=subtitle/> })
                    .collect_view()
            }}
        </div>
    }
}

#[component]
fn StatCard(title: &'static str, value: String, subtitle: &'static str) -> impl IntoView {
    view! {
        <div class="stat-card rounded-lg border border-border bg-surface-elevated p-5 shadow-sm">
            <h3 class="text-xs font-semibold uppercase tracking-wide text-fg-muted">{title}</h3>
            <div class="stat-value mt-2 text-3xl font-bold text-fg">{value}</div>
            {(!subtitle.is_empty())
                .then(|| view! { <div class="stat-subtitle mt-1 text-xs text-fg-muted">{subtitle}</div> })}
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::employee;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn empty_state_shows_three_zero_cards() {
        let html = render_to_string(move || {
            view! { <StatsCards data=Signal::derive(|| None::<UsersAttendanceResponse>)/> }
        });
        assert_eq!(html.matches("class=\"stat-card ").count(), 3);
        assert!(html.contains("Present Today"));
        assert!(!html.contains("This Month"));
    }

    #[test]
    fn loaded_data_shows_totals_and_period() {
        let html = render_to_string(move || {
            let mut away = employee("E2", "bob", vec![]);
            away.has_active_field_trip = true;
            let resp = UsersAttendanceResponse {
                success: true,
                month: 6,
                year: 2024,
                total_users: 2,
                data: vec![employee("E1", "alice", vec![]), away],
                error: None,
            };
            view! { <StatsCards data=Signal::derive(move || Some(resp.clone()))/> }
        });
        assert!(html.contains("6&#x2F;2024"));
        assert!(html.contains("Under your projects"));
        assert!(html.contains("Currently active"));
    }
}
