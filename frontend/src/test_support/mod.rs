#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::api::{
        AttendanceRecord, AttendanceType, AuthUser, EmployeeAttendance, ProjectMembership,
    };
    use crate::state::auth::{AuthState, SessionService};
    use crate::utils::{calendar::CalendarDate, storage::MemoryStorage};
    use chrono::{DateTime, NaiveTime, Utc};
    use leptos::*;
    use std::rc::Rc;

    fn at(date: CalendarDate, hour: u32) -> DateTime<Utc> {
        date.to_naive()
            .and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap())
            .and_utc()
    }

    /// Checked-out record on `date` (`YYYY-MM-DD`).
    pub fn attendance_on(date: &str, attendance_type: Option<AttendanceType>) -> AttendanceRecord {
        let mut record = checked_in_on(date);
        let day = record.date;
        record.checkout_time = Some(at(day, 12));
        record.is_checked_out = Some(true);
        record.attendance_type = attendance_type;
        record.is_full_day = Some(attendance_type == Some(AttendanceType::FullDay));
        record.is_half_day = Some(attendance_type == Some(AttendanceType::HalfDay));
        record
    }

    /// Open record on `date` with no check-out yet.
    pub fn checked_in_on(date: &str) -> AttendanceRecord {
        let day = CalendarDate::parse(date).expect("valid test date");
        AttendanceRecord {
            date: day,
            checkin_time: at(day, 4),
            checkout_time: None,
            session_type: None,
            attendance_type: None,
            location_type: None,
            taken_location: None,
            photo: None,
            audio: None,
            location: None,
            is_checked_out: Some(false),
            is_full_day: None,
            is_half_day: None,
        }
    }

    pub fn employee(
        number: &str,
        username: &str,
        attendances: Vec<AttendanceRecord>,
    ) -> EmployeeAttendance {
        EmployeeAttendance {
            employee_number: number.into(),
            username: username.into(),
            emp_class: "JRF".into(),
            date_of_resign: None,
            projects: vec![ProjectMembership {
                project_code: "P1".into(),
                department: Some("CSE".into()),
            }],
            has_active_field_trip: false,
            monthly_statistics: None,
            attendances,
        }
    }

    pub fn sso_user() -> AuthUser {
        AuthUser {
            username: "pi-sso".into(),
            project_code: "P1".into(),
            projects: vec!["P1".into(), "P2".into()],
            token: "sso-1700000000000".into(),
            is_sso: true,
        }
    }

    pub fn login_user() -> AuthUser {
        AuthUser {
            username: "pi".into(),
            project_code: "P1".into(),
            projects: vec!["P1".into()],
            token: "tok-1".into(),
            is_sso: false,
        }
    }

    pub fn memory_session() -> (SessionService, Rc<MemoryStorage>) {
        let store = Rc::new(MemoryStorage::new());
        (SessionService::new(store.clone()), store)
    }

    pub fn provide_auth(
        user: Option<AuthUser>,
    ) -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
        let (session, _store) = memory_session();
        provide_context(session);
        let (auth, set_auth) = create_signal(AuthState {
            is_authenticated: user.is_some(),
            user,
            loading: false,
        });
        provide_context((auth, set_auth));
        (auth, set_auth)
    }
}
