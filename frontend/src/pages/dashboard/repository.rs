use crate::{
    api::{
        ApiClient, ApiError, AuthUser, FieldTrip, Holiday, SsoAttendanceRequest, StatusResponse,
        UsersAttendanceResponse,
    },
    utils::calendar::CalendarDate,
};

#[derive(Clone)]
pub struct AttendanceRepository {
    client: ApiClient,
}

impl AttendanceRepository {
    pub fn new_with_client(client: ApiClient) -> Self {
        Self { client }
    }

    /// Month overview for the signed-in PI. SSO sessions go through the
    /// SSO endpoint; a per-day lookup always uses the plain endpoint.
    pub async fn fetch_users(
        &self,
        user: &AuthUser,
        month: u32,
        year: i32,
        date: Option<CalendarDate>,
    ) -> Result<UsersAttendanceResponse, ApiError> {
        if user.is_sso && date.is_none() {
            let request = SsoAttendanceRequest {
                username: user.username.clone(),
                project_codes: user.projects.clone(),
            };
            self.client
                .get_users_attendance_sso(month, year, &request)
                .await
        } else {
            self.client.get_users_attendance(month, year, date).await
        }
    }

    pub async fn fetch_holidays(&self, year: i32) -> Result<Vec<Holiday>, ApiError> {
        self.client.get_holidays(year).await
    }

    pub async fn fetch_field_trips(&self, employee_number: &str) -> Result<Vec<FieldTrip>, ApiError> {
        self.client.get_field_trips(employee_number).await
    }

    pub async fn save_field_trips(
        &self,
        employee_number: &str,
        trips: Vec<FieldTrip>,
    ) -> Result<StatusResponse, ApiError> {
        self.client.save_field_trips(employee_number, trips).await
    }
}
