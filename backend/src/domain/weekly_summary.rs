//! Weekly figures for administrative review.
//!
//! Uses the same week partition as the employee grid, so a week reviewed by
//! an administrator is always the bucket the employee saw.

use chrono::NaiveDate;
use shared::WeeklySummary;

use crate::domain::aggregate;
use crate::domain::calendar::CalendarService;
use crate::domain::models::{iso_date, is_weekend, EngineError, WeekBucket};
use crate::domain::selection::SelectionStore;
use crate::domain::week_partition::WeekPartitioner;

/// Integer percentage of working days worked, 0 when there is no capacity
pub fn availability_percent(worked_days: u32, total_working_days: u32) -> u32 {
    if total_working_days == 0 {
        0
    } else {
        worked_days * 100 / total_working_days
    }
}

pub fn summarize_weeks(weeks: &[WeekBucket]) -> Vec<WeeklySummary> {
    weeks
        .iter()
        .map(|week| WeeklySummary {
            week_number: week.week_index,
            start: iso_date(week.start_date),
            end: iso_date(week.end_date),
            total_working_days: week.working_capacity,
            worked_days: week.worked_count,
            availability: availability_percent(week.worked_count, week.working_capacity),
        })
        .collect()
}

/// Weekly summary of a month computed from a persisted date set
pub fn weekly_summaries<S: AsRef<str>>(
    calendar: &CalendarService,
    year: i32,
    month: u32,
    persisted: &[S],
) -> Result<Vec<WeeklySummary>, EngineError> {
    let mut selection = SelectionStore::new(calendar.build_month_grid(year, month)?);
    let mut weeks = WeekPartitioner::new(*calendar).partition(year, month)?;

    selection.apply_persisted(persisted);
    aggregate::recalculate(selection.cells(), &mut weeks);

    Ok(summarize_weeks(&weeks))
}

/// Dates that make up a week after an administrator sets its worked-day
/// count: the first `worked_days` working days of the week, ascending.
pub fn plan_week_override(
    calendar: &CalendarService,
    year: i32,
    month: u32,
    week_number: u32,
    worked_days: u32,
) -> Result<Vec<NaiveDate>, EngineError> {
    let weeks = WeekPartitioner::new(*calendar).partition(year, month)?;
    let week = weeks
        .iter()
        .find(|week| week.week_index == week_number)
        .ok_or(EngineError::InvalidWeek { week_number })?;

    if worked_days > week.working_capacity {
        return Err(EngineError::WeekOverrideOutOfRange {
            worked_days,
            capacity: week.working_capacity,
        });
    }

    Ok(week
        .start_date
        .iter_days()
        .take_while(|date| *date <= week.end_date)
        .filter(|date| !is_weekend(*date))
        .take(worked_days as usize)
        .collect())
}
