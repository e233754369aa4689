use crate::{
    components::{error::InlineErrorMessage, layout::LoadingSpinner},
    pages::calendar::view_model::DayLookup,
    utils::{
        calendar::{classify_record, CalendarDate, DateAttendance},
        time::{format_long_date, format_time_of_day},
    },
};
use leptos::*;

#[component]
pub fn DateAttendancePanel(
    date: CalendarDate,
    #[prop(into)] lookup: Signal<Option<DayLookup>>,
    on_close: Callback<()>,
) -> impl IntoView {
    let error = Signal::derive(move || lookup.get().and_then(Result::err));

    view! {
        <div class="date-attendance rounded-lg bg-surface-elevated p-4 shadow">
            <div class="flex items-center justify-between border-b border-border pb-2">
                <h3 class="font-semibold text-fg">
                    {format!("Attendance on {}", format_long_date(date.to_naive()))}
                </h3>
                <button type="button" class="text-fg-muted hover:text-fg" on:click=move |_| on_close.call(())>
                    "×"
                </button>
            </div>
            {move || match lookup.get() {
                None => view! { <LoadingSpinner/> }.into_view(),
                Some(Err(_)) => view! { <InlineErrorMessage error=error/> }.into_view(),
                Some(Ok(records)) if records.is_empty() => view! {
                    <p class="p-4 text-center text-sm text-fg-muted">"No attendance records for this date."</p>
                }
                .into_view(),
                Some(Ok(records)) => view! {
                    <ul class="mt-2 divide-y divide-border text-sm">
                        {records.into_iter().map(|entry| view! { <DateRow entry=entry/> }).collect_view()}
                    </ul>
                }
                .into_view(),
            }}
        </div>
    }
}

#[component]
fn DateRow(entry: DateAttendance) -> impl IntoView {
    let presence = classify_record(&entry.record);
    let check_out = entry
        .record
        .checkout_time
        .map(format_time_of_day)
        .unwrap_or_else(|| "-".to_string());
    view! {
        <li class="flex flex-wrap items-center justify-between gap-2 py-2">
            <div>
                <span class="font-semibold text-fg">{entry.username.clone()}</span>
                <span class="ml-2 font-mono text-xs text-fg-muted">{entry.employee_number.clone()}</span>
            </div>
            <div class="flex gap-3 text-fg-muted">
                <span>{format!("In: {}", format_time_of_day(entry.record.checkin_time))}</span>
                <span>{format!("Out: {}", check_out)}</span>
                <span class="font-semibold text-fg">{presence.label()}</span>
            </div>
        </li>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::{ApiError, AttendanceType};
    use crate::test_support::helpers::{attendance_on, employee};
    use crate::test_support::ssr::render_to_string;
    use crate::utils::calendar::records_on_date;

    fn june(day: u32) -> CalendarDate {
        CalendarDate::new(2024, 6, day).unwrap()
    }

    #[test]
    fn lists_usernames_for_the_day() {
        let html = render_to_string(move || {
            let users = vec![
                employee(
                    "E1",
                    "alice",
                    vec![attendance_on("2024-06-03", Some(AttendanceType::HalfDay))],
                ),
                employee("E2", "bob", vec![]),
            ];
            let records = records_on_date(&users, june(3));
            view! {
                <DateAttendancePanel
                    date=june(3)
                    lookup=Signal::derive(move || Some(DayLookup::Ok(records.clone())))
                    on_close=Callback::new(|_| ())
                />
            }
        });
        assert!(html.contains("Attendance on Monday, June 3, 2024"));
        assert!(html.contains("alice"));
        assert!(html.contains("Half Day"));
        assert!(!html.contains("bob"));
    }

    #[test]
    fn pending_and_failed_lookups() {
        let pending = render_to_string(move || {
            view! {
                <DateAttendancePanel date=june(4) lookup=Signal::derive(|| None::<DayLookup>) on_close=Callback::new(|_| ())/>
            }
        });
        assert!(pending.contains("animate-spin"));

        let failed = render_to_string(move || {
            view! {
                <DateAttendancePanel
                    date=june(4)
                    lookup=Signal::derive(|| Some(DayLookup::Err(ApiError::http_status(503, "Unavailable"))))
                    on_close=Callback::new(|_| ())
                />
            }
        });
        assert!(failed.contains("Unavailable"));
    }
}
