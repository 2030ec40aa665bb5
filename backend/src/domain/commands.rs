//! Domain-level request and outcome types.
//! These are used between the engine, the runtime loop and the storage
//! layer; the UI only ever sees the DTOs from the `shared` crate.

use crate::domain::models::{EmployeeId, LoadToken};

/// Fetch the caller must perform after a month/year change.
///
/// The result is handed back to the engine together with `token`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconciliationRequest {
    pub token: LoadToken,
    pub employee_id: EmployeeId,
    pub month: u32,
    pub year: i32,
}

/// What happened to a reconciliation result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconciliationOutcome {
    /// The persisted dates were applied to the displayed grid
    Applied { worked_days: u32 },
    /// A newer month change superseded this result; nothing changed
    Stale,
}
