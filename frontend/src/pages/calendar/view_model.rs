use crate::api::{ApiClient, ApiError, AuthUser, EmployeeAttendance, Holiday};
use crate::pages::dashboard::{repository::AttendanceRepository, utils::current_year_month};
use crate::state::auth::use_auth;
use crate::utils::calendar::{records_on_date, CalendarDate, DateAttendance};
use leptos::*;

type UsersSource = (Option<AuthUser>, u32, i32);

#[derive(Clone, Copy)]
pub struct CalendarViewModel {
    pub month: RwSignal<u32>,
    pub year: RwSignal<i32>,
    pub users_resource: Resource<UsersSource, Result<Vec<EmployeeAttendance>, ApiError>>,
    pub holidays_resource: Resource<i32, Result<Vec<Holiday>, ApiError>>,
    pub selected_date: RwSignal<Option<CalendarDate>>,
    pub day_action: Action<CalendarDate, (CalendarDate, DayLookup)>,
}

pub type DayLookup = Result<Vec<DateAttendance>, ApiError>;

impl CalendarViewModel {
    pub fn new() -> Self {
        let api = use_context::<ApiClient>().unwrap_or_default();
        let repo = AttendanceRepository::new_with_client(api);
        let (auth, _) = use_auth();
        let (current_year, current_month) = current_year_month();
        let month = create_rw_signal(current_month);
        let year = create_rw_signal(current_year);

        let users_repo = repo.clone();
        let users_resource = create_resource(
            move || (auth.with(|a| a.user.clone()), month.get(), year.get()),
            move |(user, m, y)| {
                let repo = users_repo.clone();
                async move {
                    let Some(user) = user else {
                        return Ok(Vec::new());
                    };
                    repo.fetch_users(&user, m, y, None).await.map(|r| r.data)
                }
            },
        );

        let holidays_repo = repo.clone();
        let holidays_resource = create_resource(
            move || year.get(),
            move |y| {
                let repo = holidays_repo.clone();
                async move {
                    repo.fetch_holidays(y).await.map_err(|err| {
                        log::warn!("Failed to load holidays for {}: {}", y, err);
                        err
                    })
                }
            },
        );

        let day_action = create_action(move |date: &CalendarDate| {
            let repo = repo.clone();
            let date = *date;
            let user = auth.get_untracked().user;
            async move {
                let lookup = match user {
                    Some(user) => repo
                        .fetch_users(&user, date.month(), date.year(), Some(date))
                        .await
                        .map(|response| records_on_date(&response.data, date)),
                    None => Err(ApiError::unknown("Not signed in")),
                };
                (date, lookup)
            }
        });

        let selected_date = create_rw_signal(None::<CalendarDate>);
        create_effect(move |_| {
            month.track();
            year.track();
            selected_date.set(None);
        });

        Self {
            month,
            year,
            users_resource,
            holidays_resource,
            selected_date,
            day_action,
        }
    }

    pub fn select_day(&self) -> Callback<CalendarDate> {
        let selected_date = self.selected_date;
        let day_action = self.day_action;
        Callback::new(move |date: CalendarDate| {
            selected_date.set(Some(date));
            day_action.dispatch(date);
        })
    }

    pub fn users(&self) -> Signal<Vec<EmployeeAttendance>> {
        let resource = self.users_resource;
        Signal::derive(move || {
            resource
                .get()
                .and_then(Result::ok)
                .unwrap_or_default()
        })
    }

    pub fn holidays(&self) -> Signal<Vec<Holiday>> {
        let resource = self.holidays_resource;
        Signal::derive(move || {
            resource
                .get()
                .and_then(Result::ok)
                .unwrap_or_default()
        })
    }

    /// First failed load, attendance before holidays.
    pub fn load_error(&self) -> Signal<Option<ApiError>> {
        let users = self.users_resource;
        let holidays = self.holidays_resource;
        Signal::derive(move || {
            users
                .get()
                .and_then(Result::err)
                .or_else(|| {
                    holidays.get().and_then(Result::err).map(|err| ApiError {
                        error: format!("Failed to load holidays: {}", err.error),
                        ..err
                    })
                })
        })
    }

    /// Records for the selected day, once the lookup for that day is back.
    /// A late answer for an earlier click is ignored.
    pub fn day_records(&self) -> Signal<Option<DayLookup>> {
        let selected = self.selected_date;
        let action = self.day_action;
        Signal::derive(move || {
            let date = selected.get()?;
            action
                .value()
                .get()
                .filter(|(answered, _)| *answered == date)
                .map(|(_, lookup)| lookup)
        })
    }
}

impl Default for CalendarViewModel {
    fn default() -> Self {
        Self::new()
    }
}
