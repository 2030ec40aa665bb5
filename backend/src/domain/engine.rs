//! Attendance engine for the currently displayed month.
//!
//! The engine is the single owner of the month grid, its week buckets and
//! the running worked-day counts. It is driven by three kinds of events:
//!
//! - a month/year change, which rebuilds everything and asks the caller to
//!   fetch the persisted dates for the new month,
//! - the arrival of such a fetch result, applied only if still current,
//! - a day toggle from the user.
//!
//! All methods are synchronous; the caller serialises events (see
//! [`crate::runtime`]) and performs the I/O.

use log::{debug, info, warn};
use shared::{AttendanceSubmission, MonthSnapshot, WeeklySummary};

use crate::domain::aggregate;
use crate::domain::calendar::CalendarService;
use crate::domain::commands::{ReconciliationOutcome, ReconciliationRequest};
use crate::domain::models::{
    CalendarCell, EmployeeId, EngineError, LoadToken, MonthContext, SubmissionRejection, WeekBucket,
};
use crate::domain::reconciliation::ReconciliationGuard;
use crate::domain::selection::SelectionStore;
use crate::domain::submission::{build_submission, validate_submission};
use crate::domain::week_partition::WeekPartitioner;
use crate::domain::weekly_summary::summarize_weeks;
use crate::io::mappers::CalendarMapper;

#[derive(Debug, Clone, Default)]
pub struct AttendanceEngine {
    calendar: CalendarService,
    partitioner: WeekPartitioner,
    employee_id: Option<EmployeeId>,
    month: Option<MonthContext>,
    selection: SelectionStore,
    weeks: Vec<WeekBucket>,
    monthly_worked_days: u32,
    guard: ReconciliationGuard,
}

impl AttendanceEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the engine to the logged-in employee
    pub fn initialize(&mut self, employee_id: Option<EmployeeId>) -> Result<(), EngineError> {
        let employee_id = employee_id.ok_or(EngineError::MissingSession)?;
        info!("Attendance engine initialized for employee {}", employee_id);
        self.employee_id = Some(employee_id);
        Ok(())
    }

    /// Rebuild the grid for `month`/`year` and mint a new load token.
    ///
    /// Aggregates are reset to zero; the returned request describes the
    /// persisted-date fetch the caller should start.
    pub fn begin_month_change(&mut self, month: u32, year: i32) -> Result<ReconciliationRequest, EngineError> {
        let employee_id = self.employee_id.ok_or(EngineError::NotInitialized)?;

        let context = self.calendar.month_context(year, month)?;
        let cells = self.calendar.build_month_grid(year, month)?;
        let weeks = self.partitioner.partition(year, month)?;

        self.month = Some(context);
        self.selection = SelectionStore::new(cells);
        self.weeks = weeks;
        self.monthly_worked_days = 0;

        let token = self.guard.begin();
        info!(
            "Displaying {} {} ({} days, {} working, {} weeks), {}",
            self.calendar.month_name(month),
            year,
            context.total_days,
            context.total_working_days,
            self.weeks.len(),
            token
        );

        Ok(ReconciliationRequest {
            token,
            employee_id,
            month,
            year,
        })
    }

    /// Apply the outcome of a persisted-date fetch.
    ///
    /// Results carrying a superseded token are dropped silently, whether they
    /// succeeded or failed. A failed current fetch leaves the grid untouched.
    pub fn apply_reconciliation(
        &mut self,
        token: LoadToken,
        result: anyhow::Result<Vec<String>>,
    ) -> Result<ReconciliationOutcome, EngineError> {
        if !self.guard.is_current(token) {
            debug!("Discarding stale reconciliation result {}", token);
            return Ok(ReconciliationOutcome::Stale);
        }

        let context = self.month.ok_or(EngineError::NoMonthSelected)?;
        let persisted = result.map_err(|source| {
            warn!(
                "Loading saved attendance for {}/{} failed: {:#}",
                context.month, context.year, source
            );
            EngineError::ReconciliationFailed {
                month: context.month,
                year: context.year,
                source,
            }
        })?;

        self.selection.apply_persisted(&persisted);
        self.recalculate();
        debug!(
            "Applied {} persisted dates for {}, {} worked days",
            persisted.len(),
            token,
            self.monthly_worked_days
        );

        Ok(ReconciliationOutcome::Applied {
            worked_days: self.monthly_worked_days,
        })
    }

    /// Toggle the cell at `index`. Returns whether anything changed.
    pub fn toggle_day(&mut self, index: usize) -> Result<bool, EngineError> {
        let changed = self.selection.toggle(index)?;
        if changed {
            self.recalculate();
        }
        Ok(changed)
    }

    pub fn build_submission(&self) -> Result<AttendanceSubmission, EngineError> {
        let context = self.month.ok_or(EngineError::NoMonthSelected)?;
        Ok(build_submission(&context, &self.selection))
    }

    /// Validated payload plus the employee it belongs to
    pub fn prepare_submission(&self) -> Result<(EmployeeId, AttendanceSubmission), EngineError> {
        let employee_id = self.employee_id.ok_or(EngineError::NotInitialized)?;
        let submission = self
            .build_submission()
            .map_err(|_| SubmissionRejection::NoMonthSelected)?;
        validate_submission(&submission)?;
        Ok((employee_id, submission))
    }

    /// Month chosen and at least one day worked
    pub fn is_submittable(&self) -> bool {
        self.month.is_some() && self.monthly_worked_days > 0
    }

    pub fn cells(&self) -> &[CalendarCell] {
        self.selection.cells()
    }

    pub fn weeks(&self) -> &[WeekBucket] {
        &self.weeks
    }

    pub fn monthly_worked_days(&self) -> u32 {
        self.monthly_worked_days
    }

    pub fn month_context(&self) -> Option<MonthContext> {
        self.month
    }

    pub fn current_token(&self) -> Option<LoadToken> {
        self.guard.current()
    }

    pub fn employee_id(&self) -> Option<EmployeeId> {
        self.employee_id
    }

    pub fn calendar(&self) -> &CalendarService {
        &self.calendar
    }

    pub fn weekly_summaries(&self) -> Vec<WeeklySummary> {
        summarize_weeks(&self.weeks)
    }

    pub fn snapshot(&self) -> Option<MonthSnapshot> {
        let context = self.month?;
        Some(CalendarMapper::to_snapshot(
            &context,
            self.calendar.month_name(context.month),
            self.selection.cells(),
            &self.weeks,
            self.monthly_worked_days,
        ))
    }

    fn recalculate(&mut self) {
        self.monthly_worked_days = aggregate::recalculate(self.selection.cells(), &mut self.weeks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    fn january_engine() -> (AttendanceEngine, ReconciliationRequest) {
        let mut engine = AttendanceEngine::new();
        engine.initialize(Some(EmployeeId(7))).unwrap();
        let request = engine.begin_month_change(1, 2024).unwrap();
        (engine, request)
    }

    fn persisted(dates: &[&str]) -> anyhow::Result<Vec<String>> {
        Ok(dates.iter().map(|d| d.to_string()).collect())
    }

    fn assert_consistent(engine: &AttendanceEngine) {
        let week_total: u32 = engine.weeks().iter().map(|w| w.worked_count).sum();
        assert_eq!(engine.monthly_worked_days(), week_total);
    }

    #[test]
    fn test_initialize_requires_session() {
        let mut engine = AttendanceEngine::new();
        assert!(matches!(engine.initialize(None), Err(EngineError::MissingSession)));
        assert!(matches!(
            engine.begin_month_change(1, 2024),
            Err(EngineError::NotInitialized)
        ));
    }

    #[test]
    fn test_month_change_builds_grid_and_request() {
        let (engine, request) = january_engine();

        assert_eq!(request.employee_id, EmployeeId(7));
        assert_eq!((request.month, request.year), (1, 2024));
        assert_eq!(engine.current_token(), Some(request.token));
        assert_eq!(engine.cells().len(), 31);
        assert_eq!(engine.weeks().len(), 5);
        assert_eq!(engine.monthly_worked_days(), 0);
        assert_eq!(engine.month_context().unwrap().total_working_days, 23);
    }

    #[test]
    fn test_invalid_month_keeps_previous_state() {
        let (mut engine, request) = january_engine();

        assert!(engine.begin_month_change(13, 2024).is_err());
        assert_eq!(engine.current_token(), Some(request.token));
        assert_eq!(engine.month_context().unwrap().month, 1);
    }

    #[test]
    fn test_reconciliation_applies_persisted_dates() {
        let (mut engine, request) = january_engine();

        let outcome = engine
            .apply_reconciliation(request.token, persisted(&["2024-01-02", "2024-01-03"]))
            .unwrap();

        assert_eq!(outcome, ReconciliationOutcome::Applied { worked_days: 2 });
        assert_eq!(engine.weeks()[0].worked_count, 2);
        assert!(engine.cells()[1].is_worked);
        assert!(engine.cells()[2].is_worked);
        assert_consistent(&engine);
    }

    #[test]
    fn test_reconciliation_is_idempotent() {
        let (mut engine, request) = january_engine();
        let dates = ["2024-01-02", "2024-01-15", "2024-01-29"];

        engine.apply_reconciliation(request.token, persisted(&dates)).unwrap();
        let cells = engine.cells().to_vec();
        let weeks = engine.weeks().to_vec();

        engine.apply_reconciliation(request.token, persisted(&dates)).unwrap();
        assert_eq!(engine.cells(), cells.as_slice());
        assert_eq!(engine.weeks(), weeks.as_slice());
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let (mut engine, january) = january_engine();
        let february = engine.begin_month_change(2, 2024).unwrap();

        let outcome = engine
            .apply_reconciliation(january.token, persisted(&["2024-02-01"]))
            .unwrap();
        assert_eq!(outcome, ReconciliationOutcome::Stale);
        assert!(engine.cells().iter().all(|c| !c.is_worked));
        assert_eq!(engine.monthly_worked_days(), 0);

        let outcome = engine
            .apply_reconciliation(february.token, persisted(&["2024-02-01"]))
            .unwrap();
        assert_eq!(outcome, ReconciliationOutcome::Applied { worked_days: 1 });
    }

    #[test]
    fn test_stale_failure_is_also_silent() {
        let (mut engine, january) = january_engine();
        engine.begin_month_change(2, 2024).unwrap();

        let outcome = engine
            .apply_reconciliation(january.token, Err(anyhow!("connection reset")))
            .unwrap();
        assert_eq!(outcome, ReconciliationOutcome::Stale);
    }

    #[test]
    fn test_failed_reconciliation_leaves_grid_unworked() {
        let (mut engine, request) = january_engine();

        let err = engine
            .apply_reconciliation(request.token, Err(anyhow!("503 from attendance store")))
            .unwrap_err();

        assert!(matches!(
            err,
            EngineError::ReconciliationFailed { month: 1, year: 2024, .. }
        ));
        assert!(engine.cells().iter().all(|c| !c.is_worked));
        assert_eq!(engine.monthly_worked_days(), 0);

        // retry succeeds with the same token
        let outcome = engine
            .apply_reconciliation(request.token, persisted(&["2024-01-04"]))
            .unwrap();
        assert_eq!(outcome, ReconciliationOutcome::Applied { worked_days: 1 });
    }

    #[test]
    fn test_toggle_updates_week_and_month() {
        let (mut engine, request) = january_engine();
        engine
            .apply_reconciliation(request.token, persisted(&["2024-01-02", "2024-01-03"]))
            .unwrap();

        // Jan 2nd (Tuesday) sits at index 1
        assert!(engine.toggle_day(1).unwrap());
        assert!(!engine.cells()[1].is_worked);
        assert_eq!(engine.monthly_worked_days(), 1);
        assert_eq!(engine.weeks()[0].worked_count, 1);
        assert_consistent(&engine);
    }

    #[test]
    fn test_toggle_weekend_changes_nothing() {
        let (mut engine, _) = january_engine();

        // Jan 6th is a Saturday
        assert!(!engine.toggle_day(5).unwrap());
        assert!(!engine.cells()[5].is_worked);
        assert_eq!(engine.monthly_worked_days(), 0);
    }

    #[test]
    fn test_submission_after_toggles() {
        let (mut engine, _) = january_engine();
        for index in [16, 1, 8] {
            engine.toggle_day(index).unwrap();
        }

        let submission = engine.build_submission().unwrap();
        assert_eq!(submission.worked_days, 3);
        assert_eq!(
            submission.selected_dates,
            vec!["2024-01-02", "2024-01-09", "2024-01-17"]
        );

        let (employee_id, prepared) = engine.prepare_submission().unwrap();
        assert_eq!(employee_id, EmployeeId(7));
        assert_eq!(prepared, submission);
        assert!(engine.is_submittable());
    }

    #[test]
    fn test_prepare_submission_rejects_empty_month() {
        let (engine, _) = january_engine();

        assert!(!engine.is_submittable());
        assert!(matches!(
            engine.prepare_submission(),
            Err(EngineError::InvalidSubmission(SubmissionRejection::NoWorkedDays))
        ));

        let mut fresh = AttendanceEngine::new();
        fresh.initialize(Some(EmployeeId(1))).unwrap();
        assert!(matches!(
            fresh.prepare_submission(),
            Err(EngineError::InvalidSubmission(SubmissionRejection::NoMonthSelected))
        ));
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let (mut engine, request) = january_engine();
        assert!(AttendanceEngine::new().snapshot().is_none());

        engine
            .apply_reconciliation(request.token, persisted(&["2024-01-31"]))
            .unwrap();
        let snapshot = engine.snapshot().unwrap();

        assert_eq!(snapshot.month_name, "January");
        assert_eq!(snapshot.worked_days, 1);
        assert_eq!(snapshot.first_day_of_week, 0);
        assert_eq!(snapshot.weeks[4].worked_count, 1);
        assert_eq!(engine.weekly_summaries()[4].worked_days, 1);
    }
}
