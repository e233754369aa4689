use super::{
    client::ApiClient,
    types::{
        ApiError, Holiday, HolidaysResponse, SsoAttendanceRequest, UsersAttendanceResponse,
    },
};
use crate::utils::calendar::CalendarDate;

impl ApiClient {
    pub async fn get_users_attendance(
        &self,
        month: u32,
        year: i32,
        date: Option<CalendarDate>,
    ) -> Result<UsersAttendanceResponse, ApiError> {
        let url = self.endpoint("/pi/users-attendance").await;
        let mut params: Vec<(&str, String)> =
            vec![("month", month.to_string()), ("year", year.to_string())];
        if let Some(date) = date {
            params.push(("date", date.to_string()));
        }

        self.send_json(self.http_client().get(url).query(&params))
            .await
    }

    pub async fn get_users_attendance_sso(
        &self,
        month: u32,
        year: i32,
        request: &SsoAttendanceRequest,
    ) -> Result<UsersAttendanceResponse, ApiError> {
        let url = self.endpoint("/pi/users-attendance-sso").await;
        self.send_json(
            self.http_client()
                .post(url)
                .query(&[("month", month.to_string()), ("year", year.to_string())])
                .json(request),
        )
        .await
    }

    pub async fn get_holidays(&self, year: i32) -> Result<Vec<Holiday>, ApiError> {
        let url = self.endpoint("/calendar/holidays").await;
        let response: HolidaysResponse = self
            .send_json(
                self.http_client()
                    .get(url)
                    .query(&[("year", year.to_string())]),
            )
            .await?;
        Ok(response.holidays)
    }
}
