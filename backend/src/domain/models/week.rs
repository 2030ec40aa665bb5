use chrono::NaiveDate;

/// A contiguous run of in-month dates closed by a Sunday or by month end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekBucket {
    /// 1-based position within the month
    pub week_index: u32,
    pub start_date: NaiveDate,
    /// Inclusive
    pub end_date: NaiveDate,
    /// Monday-Friday dates within `[start_date, end_date]`
    pub working_capacity: u32,
    /// Derived by the aggregate pass, reset on every recalculation
    pub worked_count: u32,
}

impl WeekBucket {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn len_days(&self) -> u32 {
        (self.end_date - self.start_date).num_days() as u32 + 1
    }
}
