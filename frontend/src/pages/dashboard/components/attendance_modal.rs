use crate::{
    api::{AttendanceRecord, EmployeeAttendance},
    pages::dashboard::utils::{filter_by_date, format_total_days},
    utils::{
        calendar::{classify_record, CalendarDate, Presence},
        time::{format_long_date, format_time_of_day, to_app_local},
    },
};
use leptos::*;

fn presence_class(presence: Presence) -> &'static str {
    match presence {
        Presence::FullDay => "badge-full",
        Presence::HalfDay => "badge-half",
        Presence::InProgress => "badge-progress",
        Presence::Absent => "badge-none",
    }
}

#[component]
pub fn AttendanceModal(user: EmployeeAttendance, on_close: Callback<()>) -> impl IntoView {
    let search = create_rw_signal(String::new());
    let stats = user.statistics();
    let title = format!("{} - Attendance Details", user.username);
    let projects = user.project_codes().join(", ");
    let employee = store_value(user.clone());

    let search_date = create_memo(move |_| search.with(|raw| CalendarDate::parse(raw)));
    let records = create_memo(move |_| {
        let date = search_date.get();
        employee.with_value(|user| filter_by_date(user, date))
    });

    view! {
        <div class="modal-backdrop fixed inset-0 z-[60] flex items-center justify-center p-4">
            <button
                type="button"
                aria-label="Close"
                class="absolute inset-0 bg-overlay-backdrop"
                on:click=move |_| on_close.call(())
            ></button>
            <div class="modal-container relative z-[61] flex max-h-[90vh] w-full max-w-2xl flex-col overflow-y-auto rounded-lg bg-surface-elevated shadow-xl" role="dialog" aria-modal="true">
                <div class="modal-header sticky top-0 flex items-center justify-between border-b border-border bg-surface-muted p-5">
                    <h2 class="modal-title text-xl font-semibold text-fg">{title}</h2>
                    <button type="button" class="close-btn text-2xl text-fg-muted hover:text-fg" on:click=move |_| on_close.call(())>
                        "×"
                    </button>
                </div>
                <div class="modal-body flex flex-col gap-5 p-5">
                    <div class="modal-info rounded bg-surface-muted p-4 text-sm text-fg">
                        <p><strong>"Employee Number: "</strong>{user.employee_number.clone()}</p>
                        <p><strong>"Employee Class: "</strong>{user.emp_class.clone()}</p>
                        <p><strong>"Projects: "</strong>{projects}</p>
                    </div>

                    <div class="stats-summary rounded border border-border p-4">
                        <h3 class="font-semibold text-fg">"Monthly Summary"</h3>
                        <div class="stats-row mt-3 flex justify-around text-center text-sm">
                            <div class="stat-item"><strong>"Total Days: "</strong><span>{format_total_days(stats.total_days)}</span></div>
                            <div class="stat-item"><strong>"Full Days: "</strong><span>{stats.full_days}</span></div>
                            <div class="stat-item"><strong>"Half Days: "</strong><span>{stats.half_days}</span></div>
                        </div>
                    </div>

                    <h3 class="section-title font-semibold text-fg">"Attendance Records"</h3>
                    <div class="search-container flex items-center gap-2">
                        <input
                            type="date"
                            class="date-search-input flex-1 rounded border border-form-control-border px-3 py-2"
                            prop:value=move || search.get()
                            on:input=move |ev| search.set(event_target_value(&ev))
                        />
                        <Show when=move || !search.get().is_empty()>
                            <button
                                type="button"
                                class="clear-search-btn rounded bg-surface-muted px-3 py-2 text-sm"
                                on:click=move |_| search.set(String::new())
                            >
                                "Clear"
                            </button>
                        </Show>
                    </div>

                    <Show
                        when=move || !records.with(Vec::is_empty)
                        fallback=move || {
                            let scope = if search_date.get().is_some() {
                                "for the selected date"
                            } else {
                                "for this month"
                            };
                            view! {
                                <p class="no-records-message p-6 text-center italic text-fg-muted">
                                    {format!("No attendance records found {}.", scope)}
                                </p>
                            }
                        }
                    >
                        <div class="attendance-list flex flex-col gap-4">
                            {move || records.get().into_iter().map(|record| view! { <RecordCard record=record/> }).collect_view()}
                        </div>
                    </Show>
                </div>
            </div>
        </div>
    }
}

#[component]
fn RecordCard(record: AttendanceRecord) -> impl IntoView {
    let presence = classify_record(&record);
    let (status_class, status_label) = if record.checked_out() {
        ("status-badge completed", "Completed")
    } else {
        ("status-badge in-progress", "In Progress")
    };
    let session = record
        .session_type
        .map(|s| s.code().to_string())
        .unwrap_or_else(|| "N/A".to_string());

    view! {
        <div class="attendance-item rounded border border-border p-4">
            <div class="attendance-date border-b border-dashed border-border pb-2 font-semibold text-fg">
                {format_long_date(to_app_local(record.checkin_time).date())}
            </div>
            <div class="attendance-details mt-3 grid grid-cols-1 gap-2 text-sm sm:grid-cols-2">
                <div><strong>"Session: "</strong><span class="badge">{session}</span></div>
                <div>
                    <strong>"Type: "</strong>
                    <span class=format!("badge {}", presence_class(presence))>{presence.label()}</span>
                </div>
                <div><strong>"Check-in: "</strong><span>{format_time_of_day(record.checkin_time)}</span></div>
                {record.checkout_time.map(|out| view! {
                    <div><strong>"Check-out: "</strong><span>{format_time_of_day(out)}</span></div>
                })}
                <div><strong>"Location: "</strong><span>{record.location_label()}</span></div>
                <div>
                    <strong>"Status: "</strong>
                    <span class=status_class>{status_label}</span>
                </div>
            </div>
            <div class="media-links mt-3 flex flex-wrap gap-2">
                {record.photo.clone().map(|photo| view! {
                    <a href=photo.url target="_blank" rel="noopener noreferrer" class="media-link photo-link">
                        "📷 Photo"
                    </a>
                })}
                {record.audio.clone().map(|audio| {
                    let length = audio
                        .duration
                        .map(|d| format!("{}s", d))
                        .unwrap_or_else(|| "unknown".to_string());
                    view! {
                        <a href=audio.url target="_blank" rel="noopener noreferrer" class="media-link audio-link">
                            {format!("🎵 Audio ({})", length)}
                        </a>
                    }
                })}
            </div>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::{AttendanceType, AudioLink, PhotoLink, SessionHalf};
    use crate::test_support::helpers::{attendance_on, checked_in_on, employee};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn shows_summary_and_every_record() {
        let html = render_to_string(move || {
            let mut full = attendance_on("2024-06-03", Some(AttendanceType::FullDay));
            full.session_type = Some(SessionHalf::Forenoon);
            full.photo = Some(PhotoLink {
                url: "https://cdn.example.org/p.jpg".into(),
            });
            full.audio = Some(AudioLink {
                url: "https://cdn.example.org/a.mp3".into(),
                duration: Some(12.0),
            });
            let user = employee("E1", "alice", vec![full, checked_in_on("2024-06-04")]);
            view! { <AttendanceModal user=user on_close=Callback::new(|_| ())/> }
        });
        assert!(html.contains("alice - Attendance Details"));
        assert!(html.contains("Monthly Summary"));
        assert!(html.contains("Full Day"));
        assert!(html.contains("In Progress"));
        assert!(html.contains("Completed"));
        assert!(html.contains("FN"));
        assert!(html.contains("Audio (12s)"));
        assert!(html.contains("https://cdn.example.org/p.jpg"));
        assert_eq!(html.matches("attendance-item").count(), 2);
    }

    #[test]
    fn employee_without_records_shows_month_message() {
        let html = render_to_string(move || {
            view! {
                <AttendanceModal user=employee("E3", "carol", vec![]) on_close=Callback::new(|_| ())/>
            }
        });
        assert!(html.contains("No attendance records found for this month."));
    }
}
