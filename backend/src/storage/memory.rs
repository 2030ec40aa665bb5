use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};
use shared::AttendanceSubmission;
use tokio::sync::RwLock;

use super::traits::AttendanceStore;
use crate::domain::models::EmployeeId;

type MonthKey = (EmployeeId, u32, i32);

/// Attendance store kept entirely in memory.
///
/// A submission replaces the stored dates for its month, the same upsert
/// semantics the remote store applies.
#[derive(Debug, Default)]
pub struct InMemoryAttendanceStore {
    days: RwLock<HashMap<MonthKey, Vec<String>>>,
    submissions: RwLock<Vec<(EmployeeId, AttendanceSubmission)>>,
}

impl InMemoryAttendanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload worked dates for one employee/month
    pub async fn seed(&self, employee_id: EmployeeId, month: u32, year: i32, dates: Vec<String>) {
        debug!("Seeding {} dates for employee {} {}/{}", dates.len(), employee_id, month, year);
        self.days.write().await.insert((employee_id, month, year), dates);
    }

    /// Every submission received so far, oldest first
    pub async fn submissions(&self) -> Vec<(EmployeeId, AttendanceSubmission)> {
        self.submissions.read().await.clone()
    }
}

#[async_trait]
impl AttendanceStore for InMemoryAttendanceStore {
    async fn fetch_persisted_dates(&self, employee_id: EmployeeId, month: u32, year: i32) -> Result<Vec<String>> {
        let days = self.days.read().await;
        Ok(days.get(&(employee_id, month, year)).cloned().unwrap_or_default())
    }

    async fn submit_attendance(&self, employee_id: EmployeeId, submission: &AttendanceSubmission) -> Result<()> {
        info!(
            "Storing attendance for employee {} {}/{}: {} of {} working days",
            employee_id,
            submission.month,
            submission.year,
            submission.worked_days,
            submission.total_working_days
        );
        self.days.write().await.insert(
            (employee_id, submission.month, submission.year),
            submission.selected_dates.clone(),
        );
        self.submissions.write().await.push((employee_id, submission.clone()));
        Ok(())
    }
}
