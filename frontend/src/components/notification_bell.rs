use crate::{
    api::{ApiClient, ApiError, Notification},
    components::confirm_dialog::ConfirmDialog,
    utils::{
        polling::{use_interval, PollGate, PollTicket, NOTIFICATION_POLL_MS},
        time::month_name,
    },
};
use leptos::*;

pub fn notification_label(notification: &Notification) -> String {
    format!("{} {}", month_name(notification.month), notification.year)
}

pub fn without_notification(list: &[Notification], sent: &Notification) -> Vec<Notification> {
    list.iter().filter(|n| *n != sent).copied().collect()
}

/// Polled list to apply, if the poll is still current and succeeded.
fn polled_list(
    ticket: &PollTicket,
    result: Result<Vec<Notification>, ApiError>,
) -> Option<Vec<Notification>> {
    if ticket.is_cancelled() {
        return None;
    }
    result
        .map_err(|err| log::warn!("Failed to fetch notifications: {}", err))
        .ok()
}

#[component]
pub fn NotificationBell(
    #[prop(optional)] initial: Option<Vec<Notification>>,
) -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let notifications = create_rw_signal(initial.unwrap_or_default());
    let (is_open, set_is_open) = create_signal(false);
    let pending = create_rw_signal(None::<Notification>);
    let (feedback, set_feedback) = create_signal(None::<Result<String, String>>);
    let gate = PollGate::new();

    let load = {
        let api = api.clone();
        let gate = gate.clone();
        Callback::new(move |_: ()| {
            let Some(ticket) = gate.try_begin() else {
                return;
            };
            let api = api.clone();
            spawn_local(async move {
                let result = api.get_notifications().await;
                if let Some(list) = polled_list(&ticket, result) {
                    notifications.set(list);
                }
            });
        })
    };

    let send_gate = gate.clone();
    create_effect(move |_| load.call(()));
    use_interval(gate, NOTIFICATION_POLL_MS, move || load.call(()));

    let send_action = create_action(move |notification: &Notification| {
        let api = api.clone();
        let notification = *notification;
        async move {
            api.submit_data(notification.month, notification.year)
                .await
                .map(|resp| (notification, resp))
        }
    });

    create_effect(move |_| {
        let Some(result) = send_action.value().get() else {
            return;
        };
        match result {
            Ok((sent, resp)) => {
                // A poll issued before the send may still list the request.
                send_gate.invalidate();
                notifications.update(|list| *list = without_notification(list, &sent));
                set_feedback.set(Some(Ok(resp
                    .message
                    .unwrap_or_else(|| "Data sent to HR".to_string()))));
            }
            Err(err) => set_feedback.set(Some(Err(format!("Error: {}", err.error)))),
        }
    });

    let confirm_open = Signal::derive(move || pending.get().is_some());
    let confirm_message = Signal::derive(move || {
        pending
            .get()
            .map(|n| format!("Send attendance data for {} to HR?", notification_label(&n)))
            .unwrap_or_default()
    });
    let on_confirm = Callback::new(move |_| {
        if let Some(notification) = pending.get_untracked() {
            set_feedback.set(None);
            send_action.dispatch(notification);
        }
        pending.set(None);
    });
    let on_cancel = Callback::new(move |_| pending.set(None));

    view! {
        <div class="relative">
            <button
                type="button"
                class="text-2xl text-fg-muted hover:text-fg"
                aria-label="HR data requests"
                on:click=move |_| set_is_open.update(|open| *open = !*open)
            >
                "🔔"
            </button>
            <Show when=move || !notifications.get().is_empty()>
                <span class="notification-badge absolute -top-1 -right-2 flex h-5 w-5 items-center justify-center rounded-full bg-status-error-text text-xs font-bold text-white">
                    {move || notifications.get().len()}
                </span>
            </Show>
            <Show when=move || is_open.get()>
                <div class="absolute right-0 top-10 z-50 w-72 rounded-lg border border-border bg-surface-elevated shadow-lg">
                    <div class="border-b border-border p-4 font-semibold text-fg">"HR Data Requests"</div>
                    {move || feedback.get().map(|result| match result {
                        Ok(msg) => view! { <p class="px-4 pt-3 text-sm text-status-success-text">{msg}</p> },
                        Err(msg) => view! { <p class="px-4 pt-3 text-sm text-status-error-text">{msg}</p> },
                    })}
                    <Show
                        when=move || !notifications.get().is_empty()
                        fallback=|| view! { <div class="p-6 text-center text-sm text-fg-muted">"No new requests"</div> }
                    >
                        <For
                            each=move || notifications.get()
                            key=|n| (n.year, n.month)
                            children=move |notification: Notification| {
                                view! {
                                    <div class="border-b border-border p-4">
                                        <p class="mb-3 text-sm text-fg">
                                            "Request for attendance data for: "
                                            <strong>{notification_label(&notification)}</strong>
                                        </p>
                                        <button
                                            type="button"
                                            class="rounded-md bg-status-success-text px-3 py-1 text-sm text-white disabled:opacity-50"
                                            disabled=move || send_action.pending().get()
                                            on:click=move |_| pending.set(Some(notification))
                                        >
                                            "Send Data to HR"
                                        </button>
                                    </div>
                                }
                            }
                        />
                    </Show>
                </div>
            </Show>
            <ConfirmDialog
                is_open=confirm_open
                title="Send data to HR"
                message=confirm_message
                on_confirm=on_confirm
                on_cancel=on_cancel
                confirm_label="Send"
            />
        </div>
    }
}
