use crate::components::{calendar::Calendar, error::InlineErrorMessage, layout::Layout};
use crate::pages::{
    calendar::{components::DateAttendancePanel, view_model::CalendarViewModel},
    dashboard::components::MonthYearFilters,
};
use leptos::*;

#[component]
pub fn CalendarPage() -> impl IntoView {
    let vm = CalendarViewModel::new();
    view! {
        <Layout active="/dashboard/calendar">
            <CalendarContent vm=vm/>
        </Layout>
    }
}

#[component]
pub fn CalendarContent(vm: CalendarViewModel) -> impl IntoView {
    let on_day_click = vm.select_day();
    let users = vm.users();
    let holidays = vm.holidays();
    let lookup = vm.day_records();
    let load_error = vm.load_error();
    let close_day = Callback::new(move |_| vm.selected_date.set(None));

    view! {
        <div class="calendar-page space-y-6">
            <div class="page-header flex flex-wrap items-center justify-between gap-3">
                <h1 class="text-2xl font-bold text-fg">"Attendance Calendar"</h1>
                <MonthYearFilters month=vm.month year=vm.year/>
            </div>
            <Show
                when=move || vm.users_resource.get().is_some()
                fallback=|| view! { <div class="loading text-fg-muted">"Loading calendar..."</div> }
            >
                <InlineErrorMessage error=load_error/>
                <Calendar
                    month=vm.month
                    year=vm.year
                    users=users
                    holidays=holidays
                    on_day_click=on_day_click
                />
            </Show>
            {move || vm.selected_date.get().map(|date| view! {
                <DateAttendancePanel date=date lookup=lookup on_close=close_day/>
            })}
        </div>
    }
}
