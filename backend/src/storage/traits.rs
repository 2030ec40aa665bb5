//! # Storage Traits
//!
//! Boundary contract with the remote attendance store.

use anyhow::Result;
use async_trait::async_trait;
use shared::AttendanceSubmission;

use crate::domain::models::EmployeeId;

/// Trait defining the operations the engine needs from the attendance store
///
/// Retry and timeout policy belong to the implementation; any error returned
/// here is surfaced to the engine's caller as recoverable.
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Dates (`YYYY-MM-DD`) already recorded as worked for this month
    async fn fetch_persisted_dates(&self, employee_id: EmployeeId, month: u32, year: i32) -> Result<Vec<String>>;

    /// Record a monthly submission
    async fn submit_attendance(&self, employee_id: EmployeeId, submission: &AttendanceSubmission) -> Result<()>;
}
