//! Splits a month into week buckets.
//!
//! A bucket starts on day 1 (or the day after the previous bucket) and runs
//! until it has included a Sunday or reached the last day of the month,
//! whichever comes first. Buckets are not ISO weeks: a month starting on a
//! Sunday gets a one-day first bucket and the final bucket may be short.

use chrono::{Datelike, Weekday};

use crate::domain::calendar::CalendarService;
use crate::domain::models::{is_weekend, EngineError, WeekBucket};

#[derive(Debug, Clone, Default)]
pub struct WeekPartitioner {
    calendar: CalendarService,
}

impl WeekPartitioner {
    pub fn new(calendar: CalendarService) -> Self {
        Self { calendar }
    }

    pub fn partition(&self, year: i32, month: u32) -> Result<Vec<WeekBucket>, EngineError> {
        let mut start = self.calendar.first_of_month(year, month)?;
        let last = self.calendar.last_of_month(year, month)?;

        let mut buckets = Vec::with_capacity(6);
        let mut week_index = 1;

        loop {
            let mut end = start;
            while end.weekday() != Weekday::Sun && end < last {
                end = match end.succ_opt() {
                    Some(next) => next,
                    None => break,
                };
            }

            let working_capacity = start
                .iter_days()
                .take_while(|date| *date <= end)
                .filter(|date| !is_weekend(*date))
                .count() as u32;

            buckets.push(WeekBucket {
                week_index,
                start_date: start,
                end_date: end,
                working_capacity,
                worked_count: 0,
            });

            if end >= last {
                break;
            }
            start = match end.succ_opt() {
                Some(next) => next,
                None => break,
            };
            week_index += 1;
        }

        Ok(buckets)
    }
}
