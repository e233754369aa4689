//! Month bucketing of attendance records into per-day presence summaries.
//!
//! Every date comparison goes through [`CalendarDate`], a plain
//! `(year, month, day)` value, so a record is matched to a day purely on its
//! calendar fields and never on an instant that could shift across a time
//! zone boundary.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::api::types::{AttendanceRecord, AttendanceType, EmployeeAttendance, Holiday};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: i32,
    month: u32,
    day: u32,
}

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::from)
    }

    /// Accepts `YYYY-MM-DD` or any ISO-8601 timestamp; only the leading
    /// date part is read.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        let date_part = trimmed.get(..10).unwrap_or(trimmed);
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            .ok()
            .map(Self::from)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn to_naive(self) -> NaiveDate {
        // Fields always come from a valid NaiveDate.
        NaiveDate::from_ymd_opt(self.year, self.month, self.day).unwrap_or_default()
    }

    pub fn weekday(self) -> Weekday {
        self.to_naive().weekday()
    }

    pub fn is_weekend(self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        CalendarDate::parse(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid calendar date: {}", raw)))
    }
}

pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

/// Empty cells ahead of day 1 in a Sunday-first week grid.
pub fn leading_blank_cells(year: i32, month: u32) -> usize {
    CalendarDate::new(year, month, 1)
        .map(|d| d.weekday().num_days_from_sunday() as usize)
        .unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    FullDay,
    HalfDay,
    InProgress,
    Absent,
}

impl Presence {
    pub fn is_present(self) -> bool {
        !matches!(self, Presence::Absent)
    }

    pub fn label(self) -> &'static str {
        match self {
            Presence::FullDay => "Full Day",
            Presence::HalfDay => "Half Day",
            Presence::InProgress => "In Progress",
            Presence::Absent => "Absent",
        }
    }
}

pub fn classify_record(record: &AttendanceRecord) -> Presence {
    if record.checkout_time.is_none() {
        return Presence::InProgress;
    }
    match record.attendance_type {
        Some(AttendanceType::FullDay) => Presence::FullDay,
        Some(AttendanceType::HalfDay) => Presence::HalfDay,
        None if record.is_full_day == Some(true) => Presence::FullDay,
        None if record.is_half_day == Some(true) => Presence::HalfDay,
        None => Presence::InProgress,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayEntry {
    pub presence: Presence,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay {
    pub date: CalendarDate,
    pub is_holiday: bool,
    pub is_weekend: bool,
    pub description: Option<String>,
    pub attendances: BTreeMap<String, DayEntry>,
}

impl CalendarDay {
    pub fn is_working_day(&self) -> bool {
        !self.is_holiday && !self.is_weekend
    }

    pub fn present_count(&self) -> usize {
        self.attendances
            .values()
            .filter(|entry| entry.presence.is_present())
            .count()
    }

    pub fn entry_count(&self) -> usize {
        self.attendances.len()
    }

    pub fn bucket(&self) -> Option<PresenceBucket> {
        PresenceBucket::from_counts(self.present_count(), self.entry_count())
    }

    pub fn css_class(&self) -> String {
        let mut classes = vec!["calendar-day"];
        if self.is_holiday {
            classes.push("holiday");
        }
        if self.is_weekend {
            classes.push("weekend");
        }
        if let Some(bucket) = self.bucket() {
            classes.push(bucket.css_class());
        }
        classes.join(" ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceBucket {
    AllPresent,
    MostlyPresent,
    SomePresent,
    MostlyAbsent,
}

impl PresenceBucket {
    pub fn from_counts(present: usize, total: usize) -> Option<Self> {
        if total == 0 {
            return None;
        }
        if present >= total {
            return Some(PresenceBucket::AllPresent);
        }
        let ratio = present as f64 / total as f64;
        Some(if ratio > 0.7 {
            PresenceBucket::MostlyPresent
        } else if ratio > 0.3 {
            PresenceBucket::SomePresent
        } else {
            PresenceBucket::MostlyAbsent
        })
    }

    pub fn css_class(self) -> &'static str {
        match self {
            PresenceBucket::AllPresent => "all-present",
            PresenceBucket::MostlyPresent => "mostly-present",
            PresenceBucket::SomePresent => "some-present",
            PresenceBucket::MostlyAbsent => "mostly-absent",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PresenceBucket::AllPresent => "All Present",
            PresenceBucket::MostlyPresent => "Mostly Present",
            PresenceBucket::SomePresent => "Some Present",
            PresenceBucket::MostlyAbsent => "Mostly Absent",
        }
    }

    pub const ALL: [PresenceBucket; 4] = [
        PresenceBucket::AllPresent,
        PresenceBucket::MostlyPresent,
        PresenceBucket::SomePresent,
        PresenceBucket::MostlyAbsent,
    ];
}

pub fn build_calendar_days(
    month: u32,
    year: i32,
    holidays: &[Holiday],
    users: &[EmployeeAttendance],
) -> Vec<CalendarDay> {
    let Some(day_count) = days_in_month(year, month) else {
        log::warn!("Skipping calendar for invalid month {}/{}", month, year);
        return Vec::new();
    };

    (1..=day_count)
        .filter_map(|day| CalendarDate::new(year, month, day))
        .map(|date| {
            let holiday = holidays.iter().find(|h| h.date == date);
            let is_holiday = holiday.is_some();
            let is_weekend = date.is_weekend();

            let mut attendances = BTreeMap::new();
            for user in users {
                let record = user.attendances.iter().find(|att| att.date == date);
                let presence = match record {
                    Some(record) => classify_record(record),
                    None if !is_holiday && !is_weekend => Presence::Absent,
                    None => continue,
                };
                attendances.insert(
                    user.employee_number.clone(),
                    DayEntry {
                        presence,
                        username: user.username.clone(),
                    },
                );
            }

            CalendarDay {
                date,
                is_holiday,
                is_weekend,
                description: holiday.and_then(|h| h.description.clone()),
                attendances,
            }
        })
        .collect()
}

/// One employee's record on a given day, as listed under the calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct DateAttendance {
    pub employee_number: String,
    pub username: String,
    pub record: AttendanceRecord,
}

pub fn records_on_date(users: &[EmployeeAttendance], date: CalendarDate) -> Vec<DateAttendance> {
    users
        .iter()
        .flat_map(|user| {
            user.attendances
                .iter()
                .filter(move |att| att.date == date)
                .map(move |att| DateAttendance {
                    employee_number: user.employee_number.clone(),
                    username: user.username.clone(),
                    record: att.clone(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{attendance_on, checked_in_on, employee};

    #[test]
    fn parses_plain_dates_and_timestamps_by_calendar_fields() {
        let expected = CalendarDate::new(2025, 1, 15).unwrap();
        assert_eq!(CalendarDate::parse("2025-01-15"), Some(expected));
        assert_eq!(CalendarDate::parse("2025-01-15T00:00:00.000Z"), Some(expected));
        assert_eq!(CalendarDate::parse("2025-01-15T23:59:59+05:30"), Some(expected));
        assert!(CalendarDate::parse("15/01/2025").is_none());
        assert!(CalendarDate::parse("").is_none());
    }

    #[test]
    fn calendar_date_serializes_as_iso_date() {
        let date = CalendarDate::new(2024, 2, 9).unwrap();
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"2024-02-09\"");
        let back: CalendarDate = serde_json::from_str("\"2024-02-09T10:00:00Z\"").unwrap();
        assert_eq!(back, date);
    }

    #[test]
    fn day_count_matches_every_month_including_leap_years() {
        let expected_2023 = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        let expected_2024 = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for month in 1..=12u32 {
            let idx = (month - 1) as usize;
            assert_eq!(
                build_calendar_days(month, 2023, &[], &[]).len(),
                expected_2023[idx]
            );
            assert_eq!(
                build_calendar_days(month, 2024, &[], &[]).len(),
                expected_2024[idx]
            );
        }
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2000, 2), Some(29));
    }

    #[test]
    fn invalid_month_yields_no_days() {
        assert!(build_calendar_days(0, 2024, &[], &[]).is_empty());
        assert!(build_calendar_days(13, 2024, &[], &[]).is_empty());
    }

    #[test]
    fn leap_day_is_an_ordinary_working_day() {
        let days = build_calendar_days(2, 2024, &[], &[]);
        assert_eq!(days.len(), 29);
        let leap_day = days.last().unwrap();
        assert_eq!(leap_day.date, CalendarDate::new(2024, 2, 29).unwrap());
        assert!(!leap_day.is_holiday);
        assert!(!leap_day.is_weekend);
        assert_eq!(leap_day.date.weekday(), Weekday::Thu);
    }

    #[test]
    fn working_days_without_records_are_absent_and_weekends_have_no_entry() {
        let users = vec![employee("E1", "alice", vec![])];
        // June 2024: 1st is a Saturday.
        let days = build_calendar_days(6, 2024, &[], &users);
        assert_eq!(days.len(), 30);
        for day in &days {
            if day.is_weekend {
                assert!(day.attendances.is_empty(), "{} should be empty", day.date);
            } else {
                assert_eq!(day.attendances["E1"].presence, Presence::Absent);
                assert_eq!(day.attendances["E1"].username, "alice");
            }
        }
        assert_eq!(users[0].statistics().not_checked_out, 0);
    }

    #[test]
    fn holidays_match_by_calendar_fields_and_suppress_absence() {
        let users = vec![employee("E1", "alice", vec![])];
        let holidays = vec![Holiday {
            date: CalendarDate::parse("2024-08-15T00:00:00.000Z").unwrap(),
            description: Some("Independence Day".into()),
        }];
        let days = build_calendar_days(8, 2024, &holidays, &users);
        let day = &days[14];
        assert!(day.is_holiday);
        assert_eq!(day.description.as_deref(), Some("Independence Day"));
        assert!(day.attendances.is_empty());
        assert!(!days[13].is_holiday);
    }

    #[test]
    fn records_are_classified_and_present_on_holidays_too() {
        let users = vec![
            employee(
                "E1",
                "alice",
                vec![
                    attendance_on("2024-06-03", Some(AttendanceType::FullDay)),
                    attendance_on("2024-06-04", Some(AttendanceType::HalfDay)),
                    checked_in_on("2024-06-05"),
                    attendance_on("2024-06-08", Some(AttendanceType::FullDay)),
                ],
            ),
            employee("E2", "bob", vec![]),
        ];
        let days = build_calendar_days(6, 2024, &[], &users);
        assert_eq!(days[2].attendances["E1"].presence, Presence::FullDay);
        assert_eq!(days[3].attendances["E1"].presence, Presence::HalfDay);
        assert_eq!(days[4].attendances["E1"].presence, Presence::InProgress);
        // Saturday work is recorded, absentees on weekends are not.
        assert_eq!(days[7].attendances["E1"].presence, Presence::FullDay);
        assert!(!days[7].attendances.contains_key("E2"));
        assert_eq!(days[2].present_count(), 1);
        assert_eq!(days[2].entry_count(), 2);
    }

    #[test]
    fn missing_checkout_is_in_progress_even_with_day_type() {
        let mut record = checked_in_on("2024-06-05");
        record.attendance_type = Some(AttendanceType::FullDay);
        record.is_full_day = Some(true);
        assert_eq!(classify_record(&record), Presence::InProgress);
    }

    #[test]
    fn checked_out_record_falls_back_to_flags() {
        let mut record = attendance_on("2024-06-05", None);
        record.is_half_day = Some(true);
        assert_eq!(classify_record(&record), Presence::HalfDay);
        record.is_half_day = None;
        record.is_full_day = Some(true);
        assert_eq!(classify_record(&record), Presence::FullDay);
        record.is_full_day = None;
        assert_eq!(classify_record(&record), Presence::InProgress);
    }

    #[test]
    fn bucket_thresholds() {
        assert_eq!(PresenceBucket::from_counts(0, 0), None);
        assert_eq!(PresenceBucket::from_counts(4, 4), Some(PresenceBucket::AllPresent));
        assert_eq!(PresenceBucket::from_counts(8, 10), Some(PresenceBucket::MostlyPresent));
        assert_eq!(PresenceBucket::from_counts(7, 10), Some(PresenceBucket::SomePresent));
        assert_eq!(PresenceBucket::from_counts(4, 10), Some(PresenceBucket::SomePresent));
        assert_eq!(PresenceBucket::from_counts(3, 10), Some(PresenceBucket::MostlyAbsent));
        assert_eq!(PresenceBucket::from_counts(0, 3), Some(PresenceBucket::MostlyAbsent));
    }

    #[test]
    fn css_class_combines_flags_and_bucket() {
        let users = vec![employee(
            "E1",
            "alice",
            vec![attendance_on("2024-06-01", Some(AttendanceType::FullDay))],
        )];
        let days = build_calendar_days(6, 2024, &[], &users);
        assert_eq!(days[0].css_class(), "calendar-day weekend all-present");
        assert_eq!(days[1].css_class(), "calendar-day weekend");
        assert_eq!(days[2].css_class(), "calendar-day mostly-absent");
    }

    #[test]
    fn records_on_date_flattens_matching_records_with_owner() {
        let users = vec![
            employee(
                "E1",
                "alice",
                vec![
                    attendance_on("2024-06-03", Some(AttendanceType::FullDay)),
                    attendance_on("2024-06-04", Some(AttendanceType::HalfDay)),
                ],
            ),
            employee("E2", "bob", vec![checked_in_on("2024-06-03")]),
            employee("E3", "carol", vec![]),
        ];
        let day = CalendarDate::new(2024, 6, 3).unwrap();
        let listed = records_on_date(&users, day);
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].username, "alice");
        assert_eq!(listed[1].employee_number, "E2");
        assert!(listed.iter().all(|entry| entry.record.date == day));
        assert!(records_on_date(&users, CalendarDate::new(2024, 6, 5).unwrap()).is_empty());
    }

    #[test]
    fn leading_blanks_follow_sunday_first_grid() {
        // 2024-06-01 is a Saturday, 2024-09-01 a Sunday.
        assert_eq!(leading_blank_cells(2024, 6), 6);
        assert_eq!(leading_blank_cells(2024, 9), 0);
        assert_eq!(leading_blank_cells(2024, 13), 0);
    }
}
