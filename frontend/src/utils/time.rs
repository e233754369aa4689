use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};

use crate::config;

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Wall-clock time in the configured zone, or the browser's local zone.
pub fn to_app_local(instant: DateTime<Utc>) -> NaiveDateTime {
    match config::current_time_zone() {
        Some(tz) => instant.with_timezone(&tz).naive_local(),
        None => instant.with_timezone(&Local).naive_local(),
    }
}

pub fn today_in_app_tz() -> NaiveDate {
    to_app_local(Utc::now()).date()
}

pub fn format_time_of_day(instant: DateTime<Utc>) -> String {
    to_app_local(instant).format("%I:%M:%S %p").to_string()
}

pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_names_cover_calendar_months_only() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(0), "");
        assert_eq!(month_name(13), "");
    }

    #[test]
    fn formats_dates_in_us_style() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(format_long_date(date), "Thursday, February 29, 2024");
        assert_eq!(format_short_date(date), "2/29/2024");
    }
}
