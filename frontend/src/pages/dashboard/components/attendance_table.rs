use crate::{
    api::{ApiError, EmployeeAttendance, UsersAttendanceResponse},
    components::{empty_state::EmptyState, error::InlineErrorMessage, layout::LoadingSpinner},
    pages::dashboard::utils::format_total_days,
};
use leptos::*;

#[component]
pub fn AttendanceTable(
    #[prop(into)] data: Signal<Option<UsersAttendanceResponse>>,
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] error: Signal<Option<ApiError>>,
    on_view: Callback<EmployeeAttendance>,
    on_manage_trips: Callback<EmployeeAttendance>,
) -> impl IntoView {
    let header_info = move || {
        data.with(|d| {
            d.as_ref().map(|resp| {
                view! {
                    <div class="header-info flex gap-4 text-sm text-fg-muted">
                        <span>{format!("Month: {}/{}", resp.month, resp.year)}</span>
                        <span>{format!("Total Users: {}", resp.total_users)}</span>
                    </div>
                }
            })
        })
    };

    let body = move || {
        if loading.get() && data.with(Option::is_none) {
            return view! { <LoadingSpinner/> }.into_view();
        }
        if error.with(Option::is_some) && data.with(Option::is_none) {
            return view! { <InlineErrorMessage error=error/> }.into_view();
        }
        let users = data.with(|d| d.as_ref().map(|r| r.data.clone()).unwrap_or_default());
        if users.is_empty() {
            return view! { <EmptyState title="No data available"/> }.into_view();
        }
        view! {
            <InlineErrorMessage error=error/>
            <div class="overflow-x-auto">
                <table class="min-w-full divide-y divide-border text-sm">
                    <thead class="bg-surface-muted text-left text-xs font-semibold uppercase text-fg-muted">
                        <tr>
                            <th class="px-4 py-3">"Employee Number"</th>
                            <th class="px-4 py-3">"Username"</th>
                            <th class="px-4 py-3">"Class"</th>
                            <th class="px-4 py-3">"Projects"</th>
                            <th class="px-4 py-3">"Monthly Stats"</th>
                            <th class="px-4 py-3">"Field Trip Status"</th>
                            <th class="px-4 py-3">"Actions"</th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-border">
                        {users
                            .into_iter()
                            .map(|user| view! {
                                <EmployeeRow user=user on_view=on_view on_manage_trips=on_manage_trips/>
                            })
                            .collect_view()}
                    </tbody>
                </table>
            </div>
        }
        .into_view()
    };

    view! {
        <div class="users-table rounded-lg bg-surface-elevated shadow">
            <div class="table-header flex flex-wrap items-center justify-between gap-2 border-b border-border p-4">
                <h2 class="text-lg font-semibold text-fg">"Employee Attendance Records"</h2>
                {header_info}
            </div>
            <div class="p-4">{body}</div>
        </div>
    }
}

#[component]
fn EmployeeRow(
    user: EmployeeAttendance,
    on_view: Callback<EmployeeAttendance>,
    on_manage_trips: Callback<EmployeeAttendance>,
) -> impl IntoView {
    let stats = user.statistics();
    let projects = user.project_codes();
    let on_trip = user.has_active_field_trip;
    let for_view = user.clone();
    let for_trips = user.clone();

    view! {
        <tr class="user-row">
            <td class="px-4 py-3 font-mono">{user.employee_number.clone()}</td>
            <td class="px-4 py-3">{user.username.clone()}</td>
            <td class="px-4 py-3">{user.emp_class.clone()}</td>
            <td class="px-4 py-3">
                <div class="project-list flex flex-wrap gap-1">
                    {projects
                        .into_iter()
                        .map(|code| view! {
                            <span class="project-tag rounded bg-surface-muted px-2 py-0.5 text-xs">{code}</span>
                        })
                        .collect_view()}
                </div>
            </td>
            <td class="px-4 py-3">
                <div class="monthly-stats flex gap-1 text-xs font-semibold">
                    <span class="stat-full rounded px-1.5 py-0.5" title="Full Days">{format!("{}F", stats.full_days)}</span>
                    <span class="stat-half rounded px-1.5 py-0.5" title="Half Days">{format!("{}H", stats.half_days)}</span>
                    <span class="stat-open rounded px-1.5 py-0.5" title="Not Checked Out">{format!("{}NC", stats.not_checked_out)}</span>
                    <span class="stat-total rounded px-1.5 py-0.5" title="Total Days">{format!("{}T", format_total_days(stats.total_days))}</span>
                </div>
            </td>
            <td class="px-4 py-3">
                <div class="field-trip-status flex items-center gap-2">
                    {if on_trip {
                        view! { <span class="status-badge active">"🏃 On Field Trip"</span> }
                    } else {
                        view! { <span class="status-badge inactive">"🏢 Campus"</span> }
                    }}
                    <button
                        type="button"
                        class="manage-trips-btn rounded border border-border px-2 py-1 text-xs hover:bg-surface-muted"
                        on:click=move |_| on_manage_trips.call(for_trips.clone())
                    >
                        "📅 Manage"
                    </button>
                </div>
            </td>
            <td class="px-4 py-3">
                <button
                    type="button"
                    class="view-btn rounded bg-action-primary-bg px-3 py-1 text-xs font-semibold text-action-primary-text"
                    on:click=move |_| on_view.call(for_view.clone())
                >
                    "View"
                </button>
            </td>
        </tr>
    }
}
