use crate::{
    api::{ApiError, EmployeeAttendance, FieldTrip},
    utils::{calendar::CalendarDate, time::today_in_app_tz},
};
use chrono::Datelike;
use thiserror::Error;

/// Years offered in the month/year filters, newest first.
pub const YEAR_RANGE: usize = 3;

pub fn current_year_month() -> (i32, u32) {
    let today = today_in_app_tz();
    (today.year(), today.month())
}

pub fn selectable_years(current_year: i32) -> Vec<i32> {
    (0..YEAR_RANGE as i32).map(|offset| current_year - offset).collect()
}

pub fn today() -> CalendarDate {
    CalendarDate::from(today_in_app_tz())
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldTripError {
    #[error("Please fill in both start and end dates")]
    MissingDates,
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("End date must be after start date")]
    EndBeforeStart,
}

impl From<FieldTripError> for ApiError {
    fn from(err: FieldTripError) -> Self {
        ApiError::validation(err.to_string())
    }
}

fn parse_trip_date(raw: &str) -> Result<CalendarDate, FieldTripError> {
    let trimmed = raw.trim();
    if trimmed.len() != 10 {
        return Err(FieldTripError::InvalidDate(trimmed.to_string()));
    }
    CalendarDate::parse(trimmed).ok_or_else(|| FieldTripError::InvalidDate(trimmed.to_string()))
}

/// Builds a trip from the editor inputs. A single-day trip is allowed.
pub fn validate_new_trip(
    start: &str,
    end: &str,
    description: &str,
) -> Result<FieldTrip, FieldTripError> {
    if start.trim().is_empty() || end.trim().is_empty() {
        return Err(FieldTripError::MissingDates);
    }
    let start_date = parse_trip_date(start)?;
    let end_date = parse_trip_date(end)?;
    if start_date > end_date {
        return Err(FieldTripError::EndBeforeStart);
    }
    let description = description.trim();
    Ok(FieldTrip {
        start_date,
        end_date,
        description: (!description.is_empty()).then(|| description.to_string()),
    })
}

pub fn is_currently_on_trip(trip: &FieldTrip, today: CalendarDate) -> bool {
    trip.start_date <= today && today <= trip.end_date
}

pub fn without_trip(trips: &[FieldTrip], index: usize) -> Vec<FieldTrip> {
    trips
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, trip)| trip.clone())
        .collect()
}

/// Employees with a record today that is not explicitly left open.
pub fn present_today(users: &[EmployeeAttendance], today: CalendarDate) -> usize {
    users
        .iter()
        .filter(|user| {
            user.attendances
                .iter()
                .any(|att| att.date == today && att.is_checked_out != Some(false))
        })
        .count()
}

pub fn on_field_trip(users: &[EmployeeAttendance]) -> usize {
    users.iter().filter(|user| user.has_active_field_trip).count()
}

/// Records narrowed to one day; no date keeps the whole month.
pub fn filter_by_date(
    user: &EmployeeAttendance,
    date: Option<CalendarDate>,
) -> Vec<crate::api::AttendanceRecord> {
    user.attendances
        .iter()
        .filter(|att| date.map_or(true, |d| att.date == d))
        .cloned()
        .collect()
}

pub fn format_total_days(total: f64) -> String {
    format!("{:.1}", total)
}
