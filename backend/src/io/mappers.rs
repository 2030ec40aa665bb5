use shared::{CalendarCellView, CalendarDayType, MonthSnapshot, WeekBucketView};

use crate::domain::models::{iso_date, CalendarCell, MonthContext, WeekBucket};

pub struct CalendarMapper;

impl CalendarMapper {
    pub fn to_snapshot(
        context: &MonthContext,
        month_name: &str,
        cells: &[CalendarCell],
        weeks: &[WeekBucket],
        worked_days: u32,
    ) -> MonthSnapshot {
        MonthSnapshot {
            month: context.month,
            year: context.year,
            month_name: month_name.to_string(),
            total_days: context.total_days,
            total_working_days: context.total_working_days,
            worked_days,
            first_day_of_week: cells.iter().take_while(|c| c.is_placeholder()).count() as u32,
            days: cells.iter().map(Self::cell_to_dto).collect(),
            weeks: weeks.iter().map(Self::week_to_dto).collect(),
        }
    }

    pub fn cell_to_dto(cell: &CalendarCell) -> CalendarCellView {
        CalendarCellView {
            date: cell.iso_date(),
            day: cell.day_of_month,
            is_weekend: cell.is_weekend,
            is_worked: cell.is_worked,
            day_type: if cell.is_placeholder() {
                CalendarDayType::PaddingBefore
            } else {
                CalendarDayType::MonthDay
            },
        }
    }

    pub fn week_to_dto(week: &WeekBucket) -> WeekBucketView {
        WeekBucketView {
            week_index: week.week_index,
            start: iso_date(week.start_date),
            end: iso_date(week.end_date),
            working_capacity: week.working_capacity,
            worked_count: week.worked_count,
        }
    }
}
