use chrono::{DateTime, Utc};
use leptos::*;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::utils::calendar::CalendarDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionHalf {
    #[serde(rename = "FN")]
    Forenoon,
    #[serde(rename = "AF")]
    Afternoon,
}

impl SessionHalf {
    pub fn code(self) -> &'static str {
        match self {
            SessionHalf::Forenoon => "FN",
            SessionHalf::Afternoon => "AF",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceType {
    FullDay,
    HalfDay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationType {
    Campus,
    #[serde(rename = "FIELDTRIP")]
    FieldTrip,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationInfo {
    #[serde(default)]
    pub taken_location: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoLink {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioLink {
    pub url: String,
    #[serde(default)]
    pub duration: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub date: CalendarDate,
    pub checkin_time: DateTime<Utc>,
    #[serde(default)]
    pub checkout_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub session_type: Option<SessionHalf>,
    #[serde(default)]
    pub attendance_type: Option<AttendanceType>,
    #[serde(default)]
    pub location_type: Option<LocationType>,
    #[serde(default)]
    pub taken_location: Option<String>,
    #[serde(default)]
    pub photo: Option<PhotoLink>,
    #[serde(default)]
    pub audio: Option<AudioLink>,
    #[serde(default)]
    pub location: Option<LocationInfo>,
    #[serde(default)]
    pub is_checked_out: Option<bool>,
    #[serde(default)]
    pub is_full_day: Option<bool>,
    #[serde(default)]
    pub is_half_day: Option<bool>,
}

impl AttendanceRecord {
    pub fn checked_out(&self) -> bool {
        self.checkout_time.is_some()
    }

    pub fn location_label(&self) -> String {
        self.location
            .as_ref()
            .and_then(|loc| loc.address.clone())
            .or_else(|| self.taken_location.clone())
            .unwrap_or_else(|| "Not specified".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMembership {
    pub project_code: String,
    #[serde(default)]
    pub department: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStatistics {
    #[serde(default)]
    pub total_days: f64,
    #[serde(default)]
    pub full_days: u32,
    #[serde(default)]
    pub half_days: u32,
    #[serde(default)]
    pub not_checked_out: u32,
}

impl MonthlyStatistics {
    pub fn from_records(records: &[AttendanceRecord]) -> Self {
        let mut stats = MonthlyStatistics::default();
        for record in records {
            if !record.checked_out() {
                stats.not_checked_out += 1;
                continue;
            }
            match record.attendance_type {
                Some(AttendanceType::FullDay) => {
                    stats.full_days += 1;
                    stats.total_days += 1.0;
                }
                Some(AttendanceType::HalfDay) => {
                    stats.half_days += 1;
                    stats.total_days += 0.5;
                }
                None => {}
            }
        }
        stats
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeAttendance {
    pub employee_number: String,
    pub username: String,
    #[serde(default)]
    pub emp_class: String,
    #[serde(default)]
    pub date_of_resign: Option<String>,
    #[serde(default)]
    pub projects: Vec<ProjectMembership>,
    #[serde(default)]
    pub has_active_field_trip: bool,
    #[serde(default)]
    pub monthly_statistics: Option<MonthlyStatistics>,
    #[serde(default)]
    pub attendances: Vec<AttendanceRecord>,
}

impl EmployeeAttendance {
    /// Server aggregate when present, otherwise derived from the records.
    pub fn statistics(&self) -> MonthlyStatistics {
        self.monthly_statistics
            .clone()
            .unwrap_or_else(|| MonthlyStatistics::from_records(&self.attendances))
    }

    pub fn project_codes(&self) -> Vec<String> {
        self.projects.iter().map(|p| p.project_code.clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersAttendanceResponse {
    pub success: bool,
    #[serde(default)]
    pub month: u32,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub total_users: u32,
    #[serde(default)]
    pub data: Vec<EmployeeAttendance>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SsoAttendanceRequest {
    pub username: String,
    pub project_codes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: CalendarDate,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolidaysResponse {
    pub success: bool,
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldTrip {
    pub start_date: CalendarDate,
    pub end_date: CalendarDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldTripsData {
    #[serde(default)]
    pub field_trips: Vec<FieldTrip>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldTripsResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<FieldTripsData>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveFieldTripsRequest {
    pub employee_number: String,
    pub field_trip_dates: Vec<FieldTrip>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub month: u32,
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationsResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<Notification>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SubmitDataRequest {
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUser {
    pub username: String,
    #[serde(default)]
    pub project_code: Option<String>,
    #[serde(default)]
    pub projects: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<LoginUser>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Identity held by the session and mirrored into browser storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub username: String,
    pub project_code: String,
    pub projects: Vec<String>,
    pub token: String,
    #[serde(default, rename = "isSSO")]
    pub is_sso: bool,
}

fn number_or_numeric_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr + TryFrom<i64>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .and_then(|v| T::try_from(v).ok())
            .ok_or_else(|| de::Error::custom(format!("number out of range: {}", n))),
        Value::String(s) => s
            .trim()
            .parse::<T>()
            .map_err(|_| de::Error::custom(format!("not a number: {}", s))),
        other => Err(de::Error::custom(format!("expected number, got {}", other))),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for ApiError {}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "VALIDATION_ERROR".to_string(),
            details: None,
        }
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "UNKNOWN".to_string(),
            details: None,
        }
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "REQUEST_FAILED".to_string(),
            details: None,
        }
    }

    pub fn http_status(status: u16, msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: format!("HTTP_{}", status),
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserialize_employee_with_full_attendance_record() {
        let value = json!({
            "employeeNumber": "E100",
            "username": "alice",
            "empClass": "JRF",
            "projects": [{ "projectCode": "P1", "department": "CSE" }],
            "hasActiveFieldTrip": true,
            "monthlyStatistics": { "totalDays": 1.5, "fullDays": 1, "halfDays": 1, "notCheckedOut": 0 },
            "attendances": [{
                "date": "2025-01-02T00:00:00.000Z",
                "checkinTime": "2025-01-02T03:30:00.000Z",
                "checkoutTime": "2025-01-02T11:30:00.000Z",
                "sessionType": "FN",
                "attendanceType": "FULL_DAY",
                "locationType": "FIELDTRIP",
                "photo": { "url": "https://cdn.example.org/p.jpg" },
                "audio": { "url": "https://cdn.example.org/a.mp3", "duration": 12 },
                "location": { "address": "Main Gate", "latitude": 12.9, "longitude": null },
                "isCheckedOut": true,
                "isFullDay": true,
                "isHalfDay": false
            }]
        });
        let employee: EmployeeAttendance = serde_json::from_value(value).unwrap();
        assert_eq!(employee.project_codes(), vec!["P1".to_string()]);
        let record = &employee.attendances[0];
        assert_eq!(record.date, CalendarDate::new(2025, 1, 2).unwrap());
        assert_eq!(record.session_type, Some(SessionHalf::Forenoon));
        assert_eq!(record.attendance_type, Some(AttendanceType::FullDay));
        assert_eq!(record.location_type, Some(LocationType::FieldTrip));
        assert_eq!(record.location_label(), "Main Gate");
        assert_eq!(record.audio.as_ref().and_then(|a| a.duration), Some(12.0));
        assert_eq!(employee.statistics().total_days, 1.5);
    }

    #[test]
    fn deserialize_minimal_employee_and_open_record() {
        let value = json!({
            "employeeNumber": "E2",
            "username": "bob",
            "attendances": [{
                "date": "2025-01-03",
                "checkinTime": "2025-01-03T04:00:00Z",
                "checkoutTime": null,
                "attendanceType": null
            }]
        });
        let employee: EmployeeAttendance = serde_json::from_value(value).unwrap();
        assert!(employee.projects.is_empty());
        assert!(!employee.has_active_field_trip);
        assert!(employee.monthly_statistics.is_none());
        assert!(!employee.attendances[0].checked_out());
        assert_eq!(employee.attendances[0].location_label(), "Not specified");
        assert_eq!(employee.statistics().not_checked_out, 1);
    }

    #[test]
    fn derived_statistics_weight_half_days() {
        let value = json!([
            { "date": "2025-01-02", "checkinTime": "2025-01-02T04:00:00Z", "checkoutTime": "2025-01-02T12:00:00Z", "attendanceType": "FULL_DAY" },
            { "date": "2025-01-03", "checkinTime": "2025-01-03T04:00:00Z", "checkoutTime": "2025-01-03T08:00:00Z", "attendanceType": "HALF_DAY" },
            { "date": "2025-01-06", "checkinTime": "2025-01-06T04:00:00Z" }
        ]);
        let records: Vec<AttendanceRecord> = serde_json::from_value(value).unwrap();
        let stats = MonthlyStatistics::from_records(&records);
        assert_eq!(stats.full_days, 1);
        assert_eq!(stats.half_days, 1);
        assert_eq!(stats.not_checked_out, 1);
        assert_eq!(stats.total_days, 1.5);
    }

    #[test]
    fn notifications_accept_numbers_and_numeric_strings() {
        let parsed: NotificationsResponse = serde_json::from_value(json!({
            "success": true,
            "data": [{ "month": "3", "year": "2025" }, { "month": 4, "year": 2025 }]
        }))
        .unwrap();
        assert_eq!(parsed.data[0], Notification { month: 3, year: 2025 });
        assert_eq!(parsed.data[1], Notification { month: 4, year: 2025 });

        let bad: Result<Notification, _> =
            serde_json::from_value(json!({ "month": "March", "year": 2025 }));
        assert!(bad.is_err());
    }

    #[test]
    fn field_trip_serializes_dates_without_time() {
        let trip = FieldTrip {
            start_date: CalendarDate::new(2025, 2, 1).unwrap(),
            end_date: CalendarDate::new(2025, 2, 3).unwrap(),
            description: None,
        };
        assert_eq!(
            serde_json::to_value(&trip).unwrap(),
            json!({ "startDate": "2025-02-01", "endDate": "2025-02-03" })
        );
        let parsed: FieldTrip = serde_json::from_value(json!({
            "startDate": "2025-02-01T00:00:00.000Z",
            "endDate": "2025-02-03T00:00:00.000Z",
            "description": "Site survey"
        }))
        .unwrap();
        assert_eq!(parsed.start_date, trip.start_date);
        assert_eq!(parsed.description.as_deref(), Some("Site survey"));
    }

    #[test]
    fn auth_user_uses_wire_field_names() {
        let user = AuthUser {
            username: "pi".into(),
            project_code: "P1".into(),
            projects: vec!["P1".into(), "P2".into()],
            token: "sso-1".into(),
            is_sso: true,
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["projectCode"], "P1");
        assert_eq!(value["isSSO"], true);
    }

    #[test]
    fn api_error_helpers_set_codes() {
        let validation = ApiError::validation("invalid payload");
        assert_eq!(validation.code, "VALIDATION_ERROR");
        assert_eq!(validation.error, "invalid payload");
        assert!(validation.details.is_none());

        assert_eq!(ApiError::unknown("x").code, "UNKNOWN");
        assert_eq!(ApiError::request_failed("x").code, "REQUEST_FAILED");
        assert_eq!(ApiError::http_status(502, "x").code, "HTTP_502");
    }

    #[test]
    fn api_error_display_and_string_conversion_match_error_text() {
        let error = ApiError::unknown("boom");
        assert_eq!(format!("{}", error), "boom");

        let raw: String = ApiError::validation("bad input").into();
        assert_eq!(raw, "bad input");
    }
}
