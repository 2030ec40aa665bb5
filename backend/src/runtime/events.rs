//! Runtime event stream payloads.

use crate::domain::models::LoadToken;

/// Events emitted from the engine loop.
///
/// Stale reconciliation results produce no event at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The grid was rebuilt for a new month and a fetch was started.
    MonthRebuilt {
        token: LoadToken,
        month: u32,
        year: i32,
    },
    /// Persisted dates were applied to the current grid.
    Reconciled { token: LoadToken, worked_days: u32 },
    /// The fetch for the current month failed; the grid stays unworked.
    ReconciliationFailed {
        token: LoadToken,
        month: u32,
        year: i32,
        message: String,
    },
    /// A working day was toggled.
    DayToggled { index: usize, worked_days: u32 },
    /// The attendance store accepted a submission.
    Submitted { month: u32, year: i32, worked_days: u32 },
    /// The attendance store rejected or failed a submission.
    SubmissionFailed { message: String },
}
