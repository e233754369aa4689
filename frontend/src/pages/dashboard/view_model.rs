use crate::api::{ApiClient, ApiError, EmployeeAttendance, UsersAttendanceResponse};
use crate::pages::dashboard::{repository::AttendanceRepository, utils::current_year_month};
use crate::state::auth::use_auth;
use crate::utils::polling::{use_interval, PollGate, DASHBOARD_POLL_MS};
use leptos::*;

#[derive(Clone, Copy)]
pub struct DashboardViewModel {
    pub month: RwSignal<u32>,
    pub year: RwSignal<i32>,
    pub data: RwSignal<Option<UsersAttendanceResponse>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<ApiError>>,
    pub detail_user: RwSignal<Option<EmployeeAttendance>>,
    pub trip_user: RwSignal<Option<EmployeeAttendance>>,
    pub refresh: Callback<()>,
}

impl DashboardViewModel {
    pub fn new(initial: Option<UsersAttendanceResponse>) -> Self {
        let api = use_context::<ApiClient>().unwrap_or_default();
        let repo = AttendanceRepository::new_with_client(api);
        let (auth, _) = use_auth();
        let (current_year, current_month) = current_year_month();

        let month = create_rw_signal(initial.as_ref().map_or(current_month, |d| d.month));
        let year = create_rw_signal(initial.as_ref().map_or(current_year, |d| d.year));
        let loading = create_rw_signal(initial.is_none());
        let data = create_rw_signal(initial);
        let error = create_rw_signal(None::<ApiError>);
        let gate = PollGate::new();

        // `true` for user-initiated loads, which replace any outstanding poll.
        let load = {
            let gate = gate.clone();
            Callback::new(move |fresh: bool| {
                let Some(user) = auth.get_untracked().user else {
                    return;
                };
                let ticket = if fresh {
                    gate.begin_fresh()
                } else {
                    gate.try_begin()
                };
                let Some(ticket) = ticket else {
                    return;
                };
                let (m, y) = (month.get_untracked(), year.get_untracked());
                if fresh {
                    loading.set(true);
                    error.set(None);
                }
                let repo = repo.clone();
                spawn_local(async move {
                    let result = repo.fetch_users(&user, m, y, None).await;
                    if ticket.is_cancelled() {
                        return;
                    }
                    match result {
                        Ok(response) => {
                            log::debug!(
                                "Loaded {} employees for {}/{}",
                                response.data.len(),
                                m,
                                y
                            );
                            data.set(Some(response));
                            error.set(None);
                        }
                        Err(err) => {
                            log::warn!("Failed to load attendance for {}/{}: {}", m, y, err);
                            error.set(Some(err));
                        }
                    }
                    loading.set(false);
                });
            })
        };

        create_effect(move |_| {
            month.track();
            year.track();
            if auth.with(|state| state.user.is_some()) {
                load.call(true);
            }
        });
        use_interval(gate, DASHBOARD_POLL_MS, move || load.call(false));

        Self {
            month,
            year,
            data,
            loading,
            error,
            detail_user: create_rw_signal(None),
            trip_user: create_rw_signal(None),
            refresh: Callback::new(move |_| load.call(true)),
        }
    }

    pub fn users(&self) -> Signal<Vec<EmployeeAttendance>> {
        let data = self.data;
        Signal::derive(move || data.with(|d| d.as_ref().map(|r| r.data.clone()).unwrap_or_default()))
    }

    pub fn open_details(&self) -> Callback<EmployeeAttendance> {
        let detail_user = self.detail_user;
        Callback::new(move |user| detail_user.set(Some(user)))
    }

    pub fn open_field_trips(&self) -> Callback<EmployeeAttendance> {
        let trip_user = self.trip_user;
        Callback::new(move |user| trip_user.set(Some(user)))
    }

    /// Closes the trip editor; a saved change also refreshes the table so
    /// the field-trip badges follow.
    pub fn close_field_trips(&self, saved: bool) {
        self.trip_user.set(None);
        if saved {
            self.refresh.call(());
        }
    }
}

pub fn use_dashboard_view_model() -> DashboardViewModel {
    use_context::<DashboardViewModel>().unwrap_or_else(|| {
        let vm = DashboardViewModel::new(None);
        provide_context(vm);
        vm
    })
}
