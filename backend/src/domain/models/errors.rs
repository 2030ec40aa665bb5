use super::session::EmployeeId;

/// Reasons an attendance payload is refused before it reaches the store
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionRejection {
    #[error("No month has been selected")]
    NoMonthSelected,
    #[error("At least one worked day must be selected")]
    NoWorkedDays,
    #[error("Total working days must be greater than 0")]
    NoWorkingDays,
    #[error("Worked days ({worked}) cannot exceed total working days ({working})")]
    WorkedExceedsWorking { worked: u32, working: u32 },
    #[error("Working days ({working}) cannot exceed total days ({total})")]
    WorkingExceedsTotal { working: u32, total: u32 },
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("No employee session; log in again")]
    MissingSession,
    #[error("Engine has not been initialized with an employee")]
    NotInitialized,
    #[error("Invalid month: {month}/{year}. Month must be between 1 and 12")]
    InvalidMonth { month: u32, year: i32 },
    #[error("No month has been selected")]
    NoMonthSelected,
    #[error("Cell index {index} is outside the {len}-cell grid")]
    CellOutOfRange { index: usize, len: usize },
    #[error("Failed to load saved attendance for {month}/{year}")]
    ReconciliationFailed {
        month: u32,
        year: i32,
        #[source]
        source: anyhow::Error,
    },
    #[error("Failed to submit attendance for employee {employee_id}")]
    SubmissionFailed {
        employee_id: EmployeeId,
        #[source]
        source: anyhow::Error,
    },
    #[error("Attendance cannot be submitted: {0}")]
    InvalidSubmission(#[from] SubmissionRejection),
    #[error("Invalid week number: {week_number}")]
    InvalidWeek { week_number: u32 },
    #[error("Worked days must be between 0 and {capacity}, got {worked_days}")]
    WeekOverrideOutOfRange { worked_days: u32, capacity: u32 },
    #[error("Engine runtime is no longer running")]
    ChannelClosed,
}
