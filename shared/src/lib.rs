use serde::{Deserialize, Serialize};

/// Monthly attendance payload handed to the remote attendance store.
///
/// Field names are serialized in camelCase because that is the wire shape
/// the attendance store accepts:
/// `{month, year, totalDays, totalWorkingDays, workedDays, selectedDates}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSubmission {
    /// Month number, 1-12
    pub month: u32,
    pub year: i32,
    /// Number of calendar days in the month
    pub total_days: u32,
    /// Number of Monday-Friday dates in the month
    pub total_working_days: u32,
    /// Number of working days marked as worked
    pub worked_days: u32,
    /// Worked dates as `YYYY-MM-DD`, ascending
    pub selected_dates: Vec<String>,
}

/// Per-week attendance figures used for administrative review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummary {
    pub week_number: u32,
    /// First date of the week bucket (`YYYY-MM-DD`)
    pub start: String,
    /// Last date of the week bucket (`YYYY-MM-DD`), inclusive
    pub end: String,
    pub total_working_days: u32,
    pub worked_days: u32,
    /// Integer percentage of working days worked, floored
    pub availability: u32,
}

/// Type of calendar day for explicit rendering logic
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CalendarDayType {
    /// Empty alignment cell before the first day of the month
    PaddingBefore,
    /// Actual day within the month
    MonthDay,
}

/// A single cell of the rendered month grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCellView {
    /// `YYYY-MM-DD`, absent for padding cells
    pub date: Option<String>,
    /// Day of month, 0 for padding cells
    pub day: u32,
    pub is_weekend: bool,
    pub is_worked: bool,
    pub day_type: CalendarDayType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekBucketView {
    pub week_index: u32,
    pub start: String,
    pub end: String,
    pub working_capacity: u32,
    pub worked_count: u32,
}

/// Everything the UI needs to render the currently displayed month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSnapshot {
    pub month: u32,
    pub year: i32,
    pub month_name: String,
    pub total_days: u32,
    pub total_working_days: u32,
    pub worked_days: u32,
    /// Number of leading padding cells (0 = month starts on Monday)
    pub first_day_of_week: u32,
    pub days: Vec<CalendarCellView>,
    pub weeks: Vec<WeekBucketView>,
}

/// Entry of the month selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthOption {
    pub value: u32,
    pub label: String,
}
