use crate::{
    api::{ApiClient, ApiError, EmployeeAttendance, FieldTrip},
    components::error::InlineErrorMessage,
    pages::dashboard::{
        repository::AttendanceRepository,
        utils::{is_currently_on_trip, today, validate_new_trip, without_trip},
    },
    utils::{polling::PollGate, time::format_short_date},
};
use leptos::*;

/// Saving needs the stored list loaded and no save in flight.
fn can_save(loaded: bool, pending: bool) -> bool {
    loaded && !pending
}

/// Editor for one employee's trips. `on_close` receives whether a save
/// went through.
#[component]
pub fn FieldTripModal(
    user: EmployeeAttendance,
    on_close: Callback<bool>,
    #[prop(optional)] initial: Option<Result<Vec<FieldTrip>, ApiError>>,
) -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let repo = AttendanceRepository::new_with_client(api);
    let employee_number = user.employee_number.clone();

    let needs_load = initial.is_none();
    let (initial_trips, initial_error) = match initial {
        Some(Ok(list)) => (Some(list), None),
        Some(Err(err)) => (None, Some(err)),
        None => (None, None),
    };
    let loaded = create_rw_signal(initial_trips.is_some());
    let trips = create_rw_signal(initial_trips.unwrap_or_default());
    let load_error = create_rw_signal(initial_error);
    let start = create_rw_signal(String::new());
    let end = create_rw_signal(String::new());
    let description = create_rw_signal(String::new());
    let error = create_rw_signal(None::<ApiError>);
    let gate = PollGate::new();
    {
        let gate = gate.clone();
        on_cleanup(move || gate.cancel());
    }

    if needs_load {
        let repo = repo.clone();
        let number = employee_number.clone();
        create_effect(move |_| {
            let Some(ticket) = gate.begin_fresh() else {
                return;
            };
            let repo = repo.clone();
            let number = number.clone();
            spawn_local(async move {
                let result = repo.fetch_field_trips(&number).await;
                if ticket.is_cancelled() {
                    return;
                }
                match result {
                    Ok(list) => {
                        trips.set(list);
                        loaded.set(true);
                    }
                    Err(err) => {
                        log::warn!("Failed to fetch field trips for {}: {}", number, err);
                        load_error.set(Some(err));
                    }
                }
            });
        });
    }

    let add_trip = move |_: ev::MouseEvent| {
        let result = start.with_untracked(|s| {
            end.with_untracked(|e| description.with_untracked(|d| validate_new_trip(s, e, d)))
        });
        match result {
            Ok(trip) => {
                trips.update(|list| list.push(trip));
                start.set(String::new());
                end.set(String::new());
                description.set(String::new());
                error.set(None);
            }
            Err(err) => error.set(Some(err.into())),
        }
    };

    let save_action = create_action(move |list: &Vec<FieldTrip>| {
        let repo = repo.clone();
        let number = employee_number.clone();
        let list = list.clone();
        async move { repo.save_field_trips(&number, list).await }
    });

    create_effect(move |_| {
        let Some(result) = save_action.value().get() else {
            return;
        };
        match result {
            Ok(_) => {
                log::info!("Field trips saved");
                on_close.call(true);
            }
            Err(err) => {
                log::warn!("Saving field trips failed: {}", err);
                error.set(Some(err));
            }
        }
    });

    let projects = user.project_codes().join(", ");
    let today = today();

    view! {
        <div class="modal fixed inset-0 z-[60] flex items-center justify-center p-4">
            <button
                type="button"
                aria-label="Close"
                class="absolute inset-0 bg-overlay-backdrop"
                on:click=move |_| on_close.call(false)
            ></button>
            <div class="modal-content relative z-[61] max-h-[90vh] w-full max-w-xl overflow-y-auto rounded-lg bg-surface-elevated shadow-xl" role="dialog" aria-modal="true">
                <div class="modal-header flex items-center justify-between border-b border-border p-5">
                    <h2 class="text-lg font-semibold text-fg">{format!("Manage Field Trips - {}", user.username)}</h2>
                    <button type="button" class="close-btn text-2xl text-fg-muted" on:click=move |_| on_close.call(false)>
                        "×"
                    </button>
                </div>
                <div class="modal-body space-y-5 p-5">
                    <div class="field-trip-info text-sm text-fg">
                        <p><strong>"Employee Number: "</strong>{user.employee_number.clone()}</p>
                        <p><strong>"Projects: "</strong>{projects}</p>
                    </div>
                    <Show
                        when=move || loaded.get()
                        fallback=move || {
                            if load_error.with(Option::is_some) {
                                view! {
                                    <div class="field-trip-load-error space-y-3">
                                        <InlineErrorMessage error=load_error/>
                                        <div class="modal-actions flex justify-end">
                                            <button type="button" class="cancel-btn rounded bg-surface-muted px-4 py-2 text-sm" on:click=move |_| on_close.call(false)>
                                                "Close"
                                            </button>
                                        </div>
                                    </div>
                                }
                                .into_view()
                            } else {
                                view! { <p class="text-sm text-fg-muted">"Loading field trips…"</p> }.into_view()
                            }
                        }
                    >
                        <div class="field-trip-form space-y-3">
                            <h3 class="font-semibold text-fg">"Schedule New Field Trip"</h3>
                            <div class="form-row grid grid-cols-2 gap-3">
                                <label class="form-group flex flex-col text-sm">
                                    "Start Date"
                                    <input
                                        type="date"
                                        class="mt-1 rounded border border-form-control-border px-2 py-1"
                                        prop:value=move || start.get()
                                        on:input=move |ev| start.set(event_target_value(&ev))
                                    />
                                </label>
                                <label class="form-group flex flex-col text-sm">
                                    "End Date"
                                    <input
                                        type="date"
                                        class="mt-1 rounded border border-form-control-border px-2 py-1"
                                        min=move || start.get()
                                        prop:value=move || end.get()
                                        on:input=move |ev| end.set(event_target_value(&ev))
                                    />
                                </label>
                            </div>
                            <label class="form-group flex flex-col text-sm">
                                "Description (Optional)"
                                <input
                                    type="text"
                                    class="mt-1 rounded border border-form-control-border px-2 py-1"
                                    placeholder="e.g., Client visit, Training"
                                    prop:value=move || description.get()
                                    on:input=move |ev| description.set(event_target_value(&ev))
                                />
                            </label>
                            <button
                                type="button"
                                class="add-trip-btn rounded bg-action-primary-bg px-3 py-2 text-sm font-semibold text-action-primary-text"
                                on:click=add_trip
                            >
                                "Schedule Field Trip"
                            </button>
                        </div>

                        <InlineErrorMessage error=error/>

                        <div class="field-trips-list space-y-2">
                            <h3 class="font-semibold text-fg">"Scheduled Field Trips"</h3>
                            <Show
                                when=move || !trips.with(Vec::is_empty)
                                fallback=|| view! { <p class="no-trips text-sm text-fg-muted">"No field trips scheduled"</p> }
                            >
                                {move || {
                                    trips
                                        .get()
                                        .into_iter()
                                        .enumerate()
                                        .map(|(index, trip)| {
                                            let active = is_currently_on_trip(&trip, today);
                                            let row_class = if active {
                                                "trip-item active-trip flex items-center justify-between rounded border border-border p-3"
                                            } else {
                                                "trip-item flex items-center justify-between rounded border border-border p-3"
                                            };
                                            view! {
                                                <div class=row_class>
                                                    <div class="trip-info flex flex-col text-sm">
                                                        <span class="trip-dates">
                                                            {format!(
                                                                "{} - {}",
                                                                format_short_date(trip.start_date.to_naive()),
                                                                format_short_date(trip.end_date.to_naive()),
                                                            )}
                                                        </span>
                                                        {trip.description.clone().map(|d| view! { <span class="trip-description text-fg-muted">{d}</span> })}
                                                        {active.then(|| view! { <span class="current-trip-badge text-xs font-bold">"ACTIVE NOW"</span> })}
                                                    </div>
                                                    <button
                                                        type="button"
                                                        class="remove-trip-btn text-sm text-status-error-text"
                                                        on:click=move |_| trips.update(|list| *list = without_trip(list, index))
                                                    >
                                                        "Remove"
                                                    </button>
                                                </div>
                                            }
                                        })
                                        .collect_view()
                                }}
                            </Show>
                        </div>

                        <div class="modal-actions flex justify-end gap-2">
                            <button type="button" class="cancel-btn rounded bg-surface-muted px-4 py-2 text-sm" on:click=move |_| on_close.call(false)>
                                "Cancel"
                            </button>
                            <button
                                type="button"
                                class="save-btn rounded bg-action-primary-bg px-4 py-2 text-sm font-semibold text-action-primary-text disabled:opacity-50"
                                disabled=move || !can_save(loaded.get(), save_action.pending().get())
                                on:click=move |_| {
                                    if !can_save(loaded.get_untracked(), save_action.pending().get_untracked()) {
                                        return;
                                    }
                                    error.set(None);
                                    save_action.dispatch(trips.get_untracked());
                                }
                            >
                                "Save Field Trips"
                            </button>
                        </div>
                    </Show>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::can_save;

    #[test]
    fn save_requires_a_loaded_list() {
        assert!(!can_save(false, false));
        assert!(!can_save(true, true));
        assert!(can_save(true, false));
    }
}
