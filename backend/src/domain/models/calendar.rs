use chrono::{Datelike, NaiveDate, Weekday};

/// One cell of the month grid.
///
/// Placeholder cells (`date == None`) only exist to align the first day of
/// the month under its weekday column. They are always flagged as weekend,
/// never worked, and cannot be toggled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: Option<NaiveDate>,
    /// Day of month, 0 for placeholders
    pub day_of_month: u32,
    pub is_weekend: bool,
    pub is_worked: bool,
}

impl CalendarCell {
    pub fn placeholder() -> Self {
        Self {
            date: None,
            day_of_month: 0,
            is_weekend: true,
            is_worked: false,
        }
    }

    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            day_of_month: date.day(),
            is_weekend: is_weekend(date),
            is_worked: false,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.date.is_none()
    }

    /// Only real working days accept user toggles
    pub fn is_toggleable(&self) -> bool {
        !self.is_placeholder() && !self.is_weekend
    }

    /// A weekend cell may carry `is_worked` from persisted data but never counts
    pub fn counts_as_worked(&self) -> bool {
        self.is_worked && self.is_toggleable()
    }

    pub fn iso_date(&self) -> Option<String> {
        self.date.map(iso_date)
    }
}

/// Figures derived once per month rebuild
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthContext {
    pub year: i32,
    /// 1-12
    pub month: u32,
    pub total_days: u32,
    /// Monday-Friday dates in the month
    pub total_working_days: u32,
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Render a date as `YYYY-MM-DD` from its own year/month/day fields
pub fn iso_date(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}
