use anyhow::anyhow;
use chrono::{Datelike, Weekday};
use proptest::prelude::*;

use attendance_backend::domain::WeekPartitioner;
use attendance_backend::{
    AttendanceEngine, CalendarService, EmployeeId, ReconciliationOutcome, ReconciliationRequest,
};

#[derive(Debug, Clone)]
enum Action {
    Toggle { index: u8 },
    Reconcile { days: Vec<u8> },
    FailedReconcile,
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => (0u8..40).prop_map(|index| Action::Toggle { index }),
        1 => prop::collection::vec(1u8..=31, 0..12).prop_map(|days| Action::Reconcile { days }),
        1 => Just(Action::FailedReconcile),
    ]
}

fn engine_for(month: u32, year: i32) -> (AttendanceEngine, ReconciliationRequest) {
    let mut engine = AttendanceEngine::new();
    engine.initialize(Some(EmployeeId(1))).unwrap();
    let request = engine.begin_month_change(month, year).unwrap();
    (engine, request)
}

fn persisted(month: u32, year: i32, days: &[u8]) -> Vec<String> {
    days.iter()
        .map(|day| format!("{:04}-{:02}-{:02}", year, month, day))
        .collect()
}

fn assert_aggregates_consistent(engine: &AttendanceEngine) {
    let weekly: u32 = engine.weeks().iter().map(|w| w.worked_count).sum();
    assert_eq!(engine.monthly_worked_days(), weekly);

    let counted = engine.cells().iter().filter(|c| c.counts_as_worked()).count() as u32;
    assert_eq!(engine.monthly_worked_days(), counted);

    for week in engine.weeks() {
        assert!(week.worked_count <= week.working_capacity);
    }
}

proptest! {
    #[test]
    fn grid_has_placeholders_then_every_day(year in 1990i32..2100, month in 1u32..=12) {
        let calendar = CalendarService::new();
        let cells = calendar.build_month_grid(year, month).unwrap();
        let days = calendar.days_in_month(year, month) as usize;

        let placeholders = cells.iter().take_while(|c| c.is_placeholder()).count();
        prop_assert!(placeholders <= 6);
        prop_assert_eq!(cells.len(), placeholders + days);

        let first = cells[placeholders].date.unwrap();
        prop_assert_eq!(first.day(), 1);
        prop_assert_eq!(first.weekday().num_days_from_monday() as usize, placeholders);

        for (offset, cell) in cells[placeholders..].iter().enumerate() {
            let date = cell.date.unwrap();
            prop_assert_eq!(date.day() as usize, offset + 1);
            prop_assert_eq!(cell.is_weekend, matches!(date.weekday(), Weekday::Sat | Weekday::Sun));
            prop_assert!(!cell.is_worked);
        }
    }

    #[test]
    fn weeks_cover_month_without_overlap(year in 1990i32..2100, month in 1u32..=12) {
        let calendar = CalendarService::new();
        let weeks = WeekPartitioner::new(calendar).partition(year, month).unwrap();
        let days = calendar.days_in_month(year, month);

        prop_assert!((4..=6).contains(&weeks.len()));
        prop_assert_eq!(weeks[0].start_date.day(), 1);
        prop_assert_eq!(weeks.last().unwrap().end_date.day(), days);
        prop_assert_eq!(weeks.iter().map(|w| w.len_days()).sum::<u32>(), days);

        for pair in weeks.windows(2) {
            prop_assert_eq!(pair[0].end_date.weekday(), Weekday::Sun);
            prop_assert_eq!(pair[0].end_date.succ_opt().unwrap(), pair[1].start_date);
            prop_assert_eq!(pair[1].start_date.weekday(), Weekday::Mon);
        }
        for (i, week) in weeks.iter().enumerate() {
            prop_assert_eq!(week.week_index as usize, i + 1);
            prop_assert_eq!(week.worked_count, 0);
        }

        let capacity: u32 = weeks.iter().map(|w| w.working_capacity).sum();
        prop_assert_eq!(capacity, calendar.total_working_days(year, month).unwrap());
    }

    #[test]
    fn random_edits_keep_weekly_and_monthly_in_step(
        year in 2000i32..2040,
        month in 1u32..=12,
        actions in prop::collection::vec(action_strategy(), 1..80),
    ) {
        let (mut engine, request) = engine_for(month, year);
        let days = engine.month_context().unwrap().total_days as u8;

        for action in actions {
            match action {
                Action::Toggle { index } => {
                    let index = index as usize;
                    if index >= engine.cells().len() {
                        prop_assert!(engine.toggle_day(index).is_err());
                        continue;
                    }
                    let before = engine.cells()[index].clone();
                    let changed = engine.toggle_day(index).unwrap();
                    prop_assert_eq!(changed, before.is_toggleable());
                    if !changed {
                        prop_assert_eq!(&engine.cells()[index], &before);
                    }
                }
                Action::Reconcile { days: picked } => {
                    let picked: Vec<u8> = picked.into_iter().filter(|d| *d <= days).collect();
                    let outcome = engine
                        .apply_reconciliation(request.token, Ok(persisted(month, year, &picked)))
                        .unwrap();
                    prop_assert!(
                        matches!(outcome, ReconciliationOutcome::Applied { .. }),
                        "current token must apply"
                    );
                }
                Action::FailedReconcile => {
                    let cells = engine.cells().to_vec();
                    let worked = engine.monthly_worked_days();
                    prop_assert!(engine
                        .apply_reconciliation(request.token, Err(anyhow!("timeout")))
                        .is_err());
                    prop_assert_eq!(engine.cells(), cells.as_slice());
                    prop_assert_eq!(engine.monthly_worked_days(), worked);
                }
            }
            assert_aggregates_consistent(&engine);
        }

        let submission = engine.build_submission().unwrap();
        prop_assert_eq!(submission.worked_days, engine.monthly_worked_days());
        prop_assert!(submission.worked_days <= submission.total_working_days);
        let mut sorted = submission.selected_dates.clone();
        sorted.sort();
        prop_assert_eq!(sorted, submission.selected_dates);
    }

    #[test]
    fn reconciliation_is_idempotent(
        year in 2000i32..2040,
        month in 1u32..=12,
        picked in prop::collection::vec(1u8..=28, 0..20),
    ) {
        let (mut engine, request) = engine_for(month, year);
        let dates = persisted(month, year, &picked);

        engine.apply_reconciliation(request.token, Ok(dates.clone())).unwrap();
        let cells = engine.cells().to_vec();
        let weeks = engine.weeks().to_vec();
        let worked = engine.monthly_worked_days();

        engine.apply_reconciliation(request.token, Ok(dates)).unwrap();
        prop_assert_eq!(engine.cells(), cells.as_slice());
        prop_assert_eq!(engine.weeks(), weeks.as_slice());
        prop_assert_eq!(engine.monthly_worked_days(), worked);
    }

    #[test]
    fn superseded_tokens_never_mutate(
        changes in prop::collection::vec((1u32..=12, 2020i32..2030), 2..6),
        picked in prop::collection::vec(1u8..=28, 1..10),
        succeed in any::<bool>(),
    ) {
        let mut engine = AttendanceEngine::new();
        engine.initialize(Some(EmployeeId(3))).unwrap();
        let requests: Vec<_> = changes
            .iter()
            .map(|(month, year)| engine.begin_month_change(*month, *year).unwrap())
            .collect();

        let cells = engine.cells().to_vec();
        let weeks = engine.weeks().to_vec();

        for request in &requests[..requests.len() - 1] {
            let result = if succeed {
                Ok(persisted(request.month, request.year, &picked))
            } else {
                Err(anyhow!("late failure"))
            };
            let outcome = engine.apply_reconciliation(request.token, result).unwrap();
            prop_assert_eq!(outcome, ReconciliationOutcome::Stale);
        }

        prop_assert_eq!(engine.cells(), cells.as_slice());
        prop_assert_eq!(engine.weeks(), weeks.as_slice());
        prop_assert_eq!(engine.monthly_worked_days(), 0);
    }
}
