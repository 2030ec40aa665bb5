//! Calendar domain logic for the attendance engine.
//!
//! This module owns every date calculation the engine needs: month lengths,
//! weekday alignment of the month grid, working-day counts and month
//! navigation. Dates are always constructed from an explicit
//! (year, month, day) triple so formatting never depends on the process
//! time zone.

use chrono::{Datelike, Local, NaiveDate};
use log::debug;
use shared::MonthOption;

use crate::config::AppConfig;
use crate::domain::models::{is_weekend, CalendarCell, EngineError, MonthContext};

/// Calendar service that handles all calendar-related business logic
#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarService;

impl CalendarService {
    /// Create a new CalendarService instance
    pub fn new() -> Self {
        Self
    }

    /// Build the month grid: leading placeholders so day 1 sits under its
    /// weekday column (Monday first), then one cell per day of the month.
    pub fn build_month_grid(&self, year: i32, month: u32) -> Result<Vec<CalendarCell>, EngineError> {
        let first = self.first_of_month(year, month)?;
        let leading = self.leading_placeholders(first);
        let total_days = self.days_in_month(year, month);

        debug!(
            "Building grid for {}/{}: {} placeholders, {} days",
            month, year, leading, total_days
        );

        let mut cells = Vec::with_capacity((leading + total_days) as usize);
        cells.extend((0..leading).map(|_| CalendarCell::placeholder()));
        cells.extend(
            first
                .iter_days()
                .take(total_days as usize)
                .map(CalendarCell::for_date),
        );
        Ok(cells)
    }

    pub fn month_context(&self, year: i32, month: u32) -> Result<MonthContext, EngineError> {
        self.first_of_month(year, month)?;
        Ok(MonthContext {
            year,
            month,
            total_days: self.days_in_month(year, month),
            total_working_days: self.total_working_days(year, month)?,
        })
    }

    pub fn first_of_month(&self, year: i32, month: u32) -> Result<NaiveDate, EngineError> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidMonth { month, year });
        }
        NaiveDate::from_ymd_opt(year, month, 1).ok_or(EngineError::InvalidMonth { month, year })
    }

    pub fn last_of_month(&self, year: i32, month: u32) -> Result<NaiveDate, EngineError> {
        let first = self.first_of_month(year, month)?;
        first
            .with_day(self.days_in_month(year, month))
            .ok_or(EngineError::InvalidMonth { month, year })
    }

    /// Number of cells before day 1 (Monday = 0 ... Sunday = 6)
    pub fn leading_placeholders(&self, first_of_month: NaiveDate) -> u32 {
        first_of_month.weekday().num_days_from_monday()
    }

    /// Get the number of days in a given month and year
    pub fn days_in_month(&self, year: i32, month: u32) -> u32 {
        match month {
            2 => {
                if self.is_leap_year(year) {
                    29
                } else {
                    28
                }
            }
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    /// Check if a year is a leap year
    pub fn is_leap_year(&self, year: i32) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    /// Count of Monday-Friday dates in the month
    pub fn total_working_days(&self, year: i32, month: u32) -> Result<u32, EngineError> {
        let first = self.first_of_month(year, month)?;
        let count = first
            .iter_days()
            .take(self.days_in_month(year, month) as usize)
            .filter(|date| !is_weekend(*date))
            .count();
        Ok(count as u32)
    }

    /// Get the human-readable name for a month number
    pub fn month_name(&self, month: u32) -> &'static str {
        match month {
            1 => "January", 2 => "February", 3 => "March", 4 => "April",
            5 => "May", 6 => "June", 7 => "July", 8 => "August",
            9 => "September", 10 => "October", 11 => "November", 12 => "December",
            _ => "Invalid Month",
        }
    }

    /// Label/value pairs for the month selector
    pub fn month_options(&self) -> Vec<MonthOption> {
        (1..=12)
            .map(|value| MonthOption {
                value,
                label: self.month_name(value).to_string(),
            })
            .collect()
    }

    /// Years offered by the year selector, anchored on `current_year`
    pub fn selectable_years(&self, current_year: i32, config: &AppConfig) -> Vec<i32> {
        let first = current_year - config.year_window_back;
        (0..config.year_window_size as i32).map(|offset| first + offset).collect()
    }

    /// Navigate to the previous month
    pub fn previous_month(&self, current_month: u32, current_year: i32) -> (u32, i32) {
        if current_month == 1 {
            (12, current_year - 1)
        } else {
            (current_month - 1, current_year)
        }
    }

    /// Navigate to the next month
    pub fn next_month(&self, current_month: u32, current_year: i32) -> (u32, i32) {
        if current_month == 12 {
            (1, current_year + 1)
        } else {
            (current_month + 1, current_year)
        }
    }

    /// Today's date on the local calendar
    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
