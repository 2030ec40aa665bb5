pub mod calendar;
pub mod errors;
pub mod session;
pub mod week;

pub use calendar::{iso_date, is_weekend, CalendarCell, MonthContext};
pub use errors::{EngineError, SubmissionRejection};
pub use session::{EmployeeId, LoadToken};
pub use week::WeekBucket;
