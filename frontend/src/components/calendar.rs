use crate::{
    api::{EmployeeAttendance, Holiday},
    utils::{
        calendar::{build_calendar_days, leading_blank_cells, CalendarDate, CalendarDay, PresenceBucket},
        time::month_name,
    },
};
use leptos::*;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[component]
pub fn Calendar(
    #[prop(into)] month: Signal<u32>,
    #[prop(into)] year: Signal<i32>,
    #[prop(into)] users: Signal<Vec<EmployeeAttendance>>,
    #[prop(into)] holidays: Signal<Vec<Holiday>>,
    #[prop(optional)] on_day_click: Option<Callback<CalendarDate>>,
) -> impl IntoView {
    let days = create_memo(move |_| {
        holidays.with(|h| users.with(|u| build_calendar_days(month.get(), year.get(), h, u)))
    });
    let blanks = move || leading_blank_cells(year.get(), month.get());
    let title = move || format!("{} {}", month_name(month.get()), year.get());

    view! {
        <div class="calendar bg-surface-elevated rounded-lg shadow p-4">
            <div class="calendar-header flex flex-wrap items-center justify-between gap-3 mb-4">
                <h2 class="text-xl font-semibold text-fg">{title}</h2>
                <div class="calendar-legend flex flex-wrap gap-2 text-xs">
                    {PresenceBucket::ALL
                        .iter()
                        .map(|bucket| {
                            view! {
                                <span class=format!("legend-item {}", bucket.css_class())>
                                    {bucket.label()}
                                </span>
                            }
                        })
                        .collect_view()}
                    <span class="legend-item holiday">"Holiday"</span>
                    <span class="legend-item weekend">"Weekend"</span>
                </div>
            </div>
            <div class="calendar-grid">
                <div class="calendar-weekdays grid grid-cols-7 text-center text-xs font-semibold text-fg-muted">
                    {WEEKDAYS.iter().map(|d| view! { <div>{*d}</div> }).collect_view()}
                </div>
                <div class="calendar-days grid grid-cols-7 gap-1 mt-1">
                    {move || {
                        (0..blanks())
                            .map(|_| view! { <div class="calendar-day empty"></div> })
                            .collect_view()
                    }}
                    <For
                        each=move || days.get()
                        key=|day| day.date
                        children=move |day: CalendarDay| {
                            view! { <DayCell day=day on_click=on_day_click/> }
                        }
                    />
                </div>
            </div>
        </div>
    }
}

#[component]
fn DayCell(day: CalendarDay, on_click: Option<Callback<CalendarDate>>) -> impl IntoView {
    let date = day.date;
    let total = day.entry_count();
    let present = day.present_count();

    view! {
        <div
            class=day.css_class()
            data-date=date.to_string()
            on:click=move |_| {
                if let Some(cb) = on_click {
                    cb.call(date);
                }
            }
        >
            <div class="day-number font-semibold">{date.day()}</div>
            {day.description.clone().map(|desc| view! { <div class="day-holiday text-xs">{desc}</div> })}
            {(total > 0).then(|| view! {
                <div class="day-attendance text-xs">
                    <span>{format!("{}/{}", present, total)}</span>
                </div>
            })}
        </div>
    }
}
