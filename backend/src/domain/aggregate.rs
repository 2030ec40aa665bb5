//! Weekly and monthly worked-day counts.

use crate::domain::models::{CalendarCell, WeekBucket};

/// Recompute every bucket's `worked_count` from scratch and return the
/// monthly worked-day total.
///
/// Only non-placeholder, non-weekend cells marked worked are counted, so the
/// returned total always equals the sum of the bucket counts.
pub fn recalculate(cells: &[CalendarCell], weeks: &mut [WeekBucket]) -> u32 {
    for week in weeks.iter_mut() {
        week.worked_count = 0;
    }

    let mut monthly_worked_days = 0;
    for cell in cells.iter().filter(|cell| cell.counts_as_worked()) {
        let Some(date) = cell.date else { continue };
        if let Some(week) = weeks.iter_mut().find(|week| week.contains(date)) {
            week.worked_count += 1;
            monthly_worked_days += 1;
        }
    }

    monthly_worked_days
}
